//! Common test utilities and fixtures

use serde::{Deserialize, Serialize};

/// Payload type round-tripped through the mock server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: u64,
    pub name: String,
    pub tags: Vec<String>,
}

/// A widget with every field populated.
#[allow(dead_code)]
pub fn sample_widget() -> Widget {
    Widget {
        id: 42,
        name: "gear".to_owned(),
        tags: vec!["alpha".to_owned(), "beta".to_owned()],
    }
}
