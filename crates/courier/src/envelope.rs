//! The uniform result envelope returned by every call.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::error::Failure;

/// Response headers as a name-to-ordered-values map.
///
/// Multi-valued headers keep their wire order under one key.
pub type Headers = HashMap<String, Vec<String>>;

/// The uniform success/status/headers/payload wrapper returned by every call.
///
/// The envelope encodes the full outcome of a round trip; the per-verb
/// methods on [`Client`](crate::Client) never return `Err`. Its fields obey
/// two invariants:
///
/// - `success == false` and `status == None`: the failure occurred before
///   any response was received (DNS, refused connection, TLS, deadline).
/// - `success == false` and `status == Some(..)`: the server responded with
///   a non-success status, or the body could not be decoded; `headers` and
///   `raw_body` (when readable) are still populated.
///
/// # Examples
///
/// ```rust,no_run
/// use courier::{CallOptions, Client, Json};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Widget { id: u64 }
///
/// # async fn example(client: Client) {
/// let response = client
///     .get::<Json<Widget>>("https://api.example.com/widgets/1", &CallOptions::default())
///     .await;
///
/// match response.payload {
///     Some(Json(widget)) => println!("widget {}", widget.id),
///     None => eprintln!("call failed: {:?}", response.failure),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    /// Whether the call produced a decoded payload.
    pub success: bool,
    /// HTTP status code; absent when no response was received.
    pub status: Option<StatusCode>,
    /// Response headers; empty when no response was received.
    pub headers: Headers,
    /// Decoded payload; present only on success.
    pub payload: Option<T>,
    /// Raw response body attached to failure envelopes when one was read.
    pub raw_body: Option<Bytes>,
    /// What went wrong; `None` exactly when `success`.
    pub failure: Option<Failure>,
}

impl<T> Envelope<T> {
    /// A successful round trip with a decoded payload.
    pub(crate) fn ok(status: StatusCode, headers: Headers, payload: T) -> Self {
        Self {
            success: true,
            status: Some(status),
            headers,
            payload: Some(payload),
            raw_body: None,
            failure: None,
        }
    }

    /// The server responded with a non-success status.
    pub(crate) fn rejected(status: StatusCode, headers: Headers, raw_body: Option<Bytes>) -> Self {
        Self {
            success: false,
            status: Some(status),
            headers,
            payload: None,
            raw_body,
            failure: Some(Failure::Status { status }),
        }
    }

    /// A response arrived but its body could not be decoded.
    pub(crate) fn undecodable(
        status: StatusCode,
        headers: Headers,
        raw_body: Option<Bytes>,
        failure: Failure,
    ) -> Self {
        Self {
            success: false,
            status: Some(status),
            headers,
            payload: None,
            raw_body,
            failure: Some(failure),
        }
    }

    /// The call failed before any response was received.
    pub(crate) fn failed(failure: Failure) -> Self {
        Self {
            success: false,
            status: None,
            headers: Headers::new(),
            payload: None,
            raw_body: None,
            failure: Some(failure),
        }
    }

    /// First value of the named response header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .get(&name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Consume the envelope and return the payload, if any.
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

/// Copy a response header map into the envelope's multi-value form.
///
/// Header names are lowercased; values that are not valid UTF-8 are skipped.
pub(crate) fn collect_headers(headers: &HeaderMap) -> Headers {
    let mut map = Headers::new();
    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();
        if !values.is_empty() {
            map.insert(name.as_str().to_owned(), values);
        }
    }
    map
}
