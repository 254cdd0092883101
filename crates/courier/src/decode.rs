//! Response decode targets.
//!
//! The closed set of payload shapes a response can be decoded into:
//!
//! - [`String`] — the raw body text.
//! - [`Bytes`] — the exact body bytes, independent of content type.
//! - [`ByteStream`] — the live body as a stream of byte chunks.
//! - [`Json<T>`] — the body JSON-decoded into `T`.
//!
//! The caller selects the target through the type parameter of the per-verb
//! methods on [`Client`](crate::Client); nothing is inferred from headers.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::error::Failure;

/// Why a decode failed, plus the raw body when it had been buffered.
#[derive(Debug)]
pub struct DecodeError {
    /// The tagged failure to surface on the envelope.
    pub failure: Failure,
    /// The body bytes read before the failure, if any.
    pub raw_body: Option<Bytes>,
}

impl DecodeError {
    fn before_read(failure: Failure) -> Self {
        Self {
            failure,
            raw_body: None,
        }
    }

    fn with_body(failure: Failure, raw_body: Bytes) -> Self {
        Self {
            failure,
            raw_body: Some(raw_body),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for bytes::Bytes {}
    impl Sealed for super::ByteStream {}
    impl<T> Sealed for super::Json<T> {}
}

/// How a successful response body becomes a payload value.
///
/// Sealed: the four implementations above are the whole set.
#[async_trait]
pub trait DecodePayload: sealed::Sealed + Sized + Send {
    /// Consume the response body and produce the payload.
    async fn decode(response: reqwest::Response) -> Result<Self, DecodeError>;
}

/// Marker selecting JSON decoding into `T`.
///
/// Wraps the decoded value so the caller names the decoding explicitly:
/// `client.get::<Json<Widget>>(..)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(
    /// The decoded value.
    pub T,
);

impl<T> Json<T> {
    /// Unwrap the decoded value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[async_trait]
impl DecodePayload for String {
    async fn decode(response: reqwest::Response) -> Result<Self, DecodeError> {
        let bytes = read_body(response).await?;
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Ok(text),
            Err(err) => Err(DecodeError::with_body(
                Failure::decode(format!("response body is not valid utf-8: {err}")),
                bytes,
            )),
        }
    }
}

#[async_trait]
impl DecodePayload for Bytes {
    async fn decode(response: reqwest::Response) -> Result<Self, DecodeError> {
        read_body(response).await
    }
}

#[async_trait]
impl<T> DecodePayload for Json<T>
where
    T: DeserializeOwned + Send,
{
    async fn decode(response: reqwest::Response) -> Result<Self, DecodeError> {
        let bytes = read_body(response).await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Json(value)),
            Err(err) => Err(DecodeError::with_body(Failure::decode(err.to_string()), bytes)),
        }
    }
}

#[async_trait]
impl DecodePayload for ByteStream {
    async fn decode(response: reqwest::Response) -> Result<Self, DecodeError> {
        let inner = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(Failure::from_body_error));
        Ok(ByteStream {
            inner: Box::pin(inner),
        })
    }
}

async fn read_body(response: reqwest::Response) -> Result<Bytes, DecodeError> {
    response
        .bytes()
        .await
        .map_err(|err| DecodeError::before_read(Failure::from_body_error(err)))
}

/// The response body as a stream of byte chunks.
///
/// The body is handed over live; nothing is buffered up front. Chunks that
/// fail mid-read surface as [`Failure`] items.
pub struct ByteStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, Failure>> + Send>>,
}

impl ByteStream {
    /// Drain the stream and buffer the remaining chunks contiguously.
    pub async fn collect(mut self) -> Result<Bytes, Failure> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.inner.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl Stream for ByteStream {
    type Item = Result<Bytes, Failure>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream").finish_non_exhaustive()
    }
}
