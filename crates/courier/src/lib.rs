//! # Courier
//!
//! A thin typed layer over an HTTP transport. Courier standardizes building
//! requests (method, headers, query parameters, authorization, body
//! encoding) and decoding responses (JSON, text, bytes, stream) into one
//! uniform [`Envelope`] result, so calling code issues
//! GET/POST/PUT/PATCH/DELETE requests without repeating serialization,
//! header, or error-wrapping boilerplate.
//!
//! Failures never surface as `Err` values from the per-verb API: transport
//! failures, non-success statuses, and decode failures all arrive as tagged
//! [`Failure`] kinds inside the envelope, each carrying whatever diagnostic
//! context was available.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier::{CallOptions, Client, Json, RequestBody};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Widget {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), courier::Failure> {
//!     let client = Client::new()?;
//!
//!     let call = CallOptions::default()
//!         .with_token("tok123")
//!         .with_query("page", "1");
//!
//!     let body = RequestBody::json(&Widget { name: "gear".into() })?;
//!     let response = client
//!         .post::<Json<Widget>>("https://api.example.com/widgets", body, &call)
//!         .await;
//!
//!     if let Some(Json(widget)) = response.payload {
//!         println!("created {}", widget.name);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use auth::{AuthSchemes, DEFAULT_SCHEME};
pub use body::RequestBody;
pub use client::{CallOptions, Client};
pub use config::ClientConfig;
pub use decode::{ByteStream, DecodePayload, Json};
pub use envelope::{Envelope, Headers};
pub use error::Failure;

// Module declarations
pub mod auth;
pub mod body;
pub mod client;
pub mod config;
pub mod decode;
pub mod envelope;
pub mod error;

// Re-export HTTP types from the http crate for convenience
pub use http::{Method, StatusCode};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{CallOptions, Client, ClientConfig, Envelope, Failure, Json, RequestBody};
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `Accept` media type used when the caller does not override it
pub const DEFAULT_ACCEPT: &str = "application/json";
