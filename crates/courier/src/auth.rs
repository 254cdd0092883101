//! Authorization scheme registry.
//!
//! A scheme name maps to the prefix placed before the access token in the
//! `Authorization` header. The registry ships with one entry,
//! `"default"` → `"Bearer"`, and can be extended for APIs that use other
//! prefixes (`Token`, `Basic`, vendor-specific).

use std::collections::HashMap;

use crate::error::Failure;

/// Scheme name used when the caller does not pick one explicitly.
pub const DEFAULT_SCHEME: &str = "default";

/// Named lookup from authorization scheme to header prefix.
#[derive(Debug, Clone)]
pub struct AuthSchemes {
    prefixes: HashMap<String, String>,
}

impl Default for AuthSchemes {
    fn default() -> Self {
        let mut prefixes = HashMap::new();
        prefixes.insert(DEFAULT_SCHEME.to_owned(), "Bearer".to_owned());
        Self { prefixes }
    }
}

impl AuthSchemes {
    /// Register a scheme, replacing any previous prefix under that name.
    pub fn register(&mut self, scheme: impl Into<String>, prefix: impl Into<String>) {
        self.prefixes.insert(scheme.into(), prefix.into());
    }

    /// Look up the header prefix for a scheme name.
    pub fn prefix(&self, scheme: &str) -> Option<&str> {
        self.prefixes.get(scheme).map(String::as_str)
    }

    /// Assemble the `Authorization` header value for a scheme and token.
    pub(crate) fn header_value(&self, scheme: &str, token: &str) -> Result<String, Failure> {
        let prefix = self.prefix(scheme).ok_or_else(|| Failure::UnknownScheme {
            scheme: scheme.to_owned(),
        })?;
        Ok(format!("{prefix} {token}"))
    }
}
