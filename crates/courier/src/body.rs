//! Request body encoding variants.
//!
//! The caller picks the encoding explicitly; nothing is inferred from the
//! payload's type at call time. A fully custom pre-built request bypasses
//! encoding entirely via [`Client::send_raw`](crate::Client::send_raw).

use bytes::Bytes;
use serde::Serialize;

use crate::error::Failure;

/// A request body with its encoding already applied.
///
/// Constructed through [`RequestBody::json`], [`RequestBody::form`], or
/// [`RequestBody::binary`]; serialization happens eagerly so a bad payload
/// fails before anything touches the network.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// UTF-8 JSON, sent as `application/json`.
    Json(Bytes),
    /// URL-encoded pairs, sent as `application/x-www-form-urlencoded`.
    Form(Bytes),
    /// Opaque bytes with a caller-supplied content type.
    Binary {
        /// Media type placed in the `Content-Type` header.
        content_type: String,
        /// The payload bytes.
        data: Bytes,
    },
}

impl RequestBody {
    /// Serialize a value to JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, Failure> {
        serde_json::to_vec(value)
            .map(|body| Self::Json(body.into()))
            .map_err(|err| Failure::build(format!("json body serialization failed: {err}")))
    }

    /// Serialize key/value pairs (or any form-shaped value) to a form body.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use courier::RequestBody;
    ///
    /// let body = RequestBody::form(&[("user", "alice"), ("role", "admin")]).unwrap();
    /// assert_eq!(body.content_type(), "application/x-www-form-urlencoded");
    /// ```
    pub fn form<T: Serialize>(value: &T) -> Result<Self, Failure> {
        serde_urlencoded::to_string(value)
            .map(|body| Self::Form(Bytes::from(body)))
            .map_err(|err| Failure::build(format!("form body serialization failed: {err}")))
    }

    /// Wrap opaque bytes with an explicit content type.
    pub fn binary(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::Binary {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// The `Content-Type` this body is sent with.
    pub fn content_type(&self) -> &str {
        match self {
            Self::Json(_) => "application/json",
            Self::Form(_) => "application/x-www-form-urlencoded",
            Self::Binary { content_type, .. } => content_type,
        }
    }

    /// Split into content type and payload bytes for dispatch.
    pub(crate) fn into_parts(self) -> (String, Bytes) {
        match self {
            Self::Json(data) => ("application/json".to_owned(), data),
            Self::Form(data) => ("application/x-www-form-urlencoded".to_owned(), data),
            Self::Binary { content_type, data } => (content_type, data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Login {
        user: String,
        code: u32,
    }

    #[test]
    fn json_body_serializes_eagerly() {
        let body = RequestBody::json(&Login {
            user: "alice".into(),
            code: 7,
        })
        .unwrap();
        let (content_type, data) = body.into_parts();
        assert_eq!(content_type, "application/json");
        assert_eq!(&data[..], br#"{"user":"alice","code":7}"#);
    }

    #[test]
    fn form_body_url_encodes_values() {
        let body = RequestBody::form(&[("q", "a b"), ("lang", "en")]).unwrap();
        let (content_type, data) = body.into_parts();
        assert_eq!(content_type, "application/x-www-form-urlencoded");
        assert_eq!(&data[..], b"q=a+b&lang=en");
    }

    #[test]
    fn binary_body_keeps_caller_content_type() {
        let body = RequestBody::binary("image/jpeg", vec![0xff, 0xd8]);
        assert_eq!(body.content_type(), "image/jpeg");
        let (_, data) = body.into_parts();
        assert_eq!(&data[..], &[0xff, 0xd8]);
    }
}
