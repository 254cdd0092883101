//! Failure taxonomy for courier calls.
//!
//! Failures never cross the API boundary as `Err` values. Every call returns
//! an [`Envelope`](crate::Envelope) and a failed call carries one of the
//! tagged [`Failure`] kinds below, so callers can tell "never got a
//! response" apart from "got a response but could not interpret it".

use http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong during one request/response round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The request never produced a response (DNS, refused connection, TLS).
    #[error("transport failure: {message}")]
    Transport {
        /// Diagnostic detail from the transport.
        message: String,
    },

    /// The deadline elapsed before a response arrived.
    #[error("request deadline elapsed")]
    Timeout,

    /// The request could not be assembled (URL, headers, body serialization).
    #[error("failed to build request: {message}")]
    Build {
        /// What was wrong with the request parameters.
        message: String,
    },

    /// The authorization scheme name is not registered.
    #[error("unknown authorization scheme: {scheme}")]
    UnknownScheme {
        /// The scheme name that failed to resolve.
        scheme: String,
    },

    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status {
        /// The non-success status code.
        status: StatusCode,
    },

    /// A response arrived but its body could not be interpreted.
    #[error("failed to decode response body: {message}")]
    Decode {
        /// Diagnostic detail from the decoder.
        message: String,
    },
}

impl Failure {
    /// Shorthand for a [`Failure::Build`] with a formatted message.
    pub(crate) fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Failure::Decode`] with a formatted message.
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Classify an error raised while dispatching a request.
    pub(crate) fn from_send_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::Build {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }

    /// Classify an error raised while reading a response body.
    ///
    /// A body read can still time out or lose the connection, so the same
    /// transport/timeout distinction applies after the status line arrived.
    pub(crate) fn from_body_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_diagnostic_context() {
        let failure = Failure::build("invalid url");
        assert_eq!(
            failure.to_string(),
            "failed to build request: invalid url"
        );

        let failure = Failure::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(failure.to_string(), "server returned status 404 Not Found");
    }

    #[test]
    fn unknown_scheme_names_the_scheme() {
        let failure = Failure::UnknownScheme {
            scheme: "hmac".into(),
        };
        assert_eq!(failure.to_string(), "unknown authorization scheme: hmac");
    }
}
