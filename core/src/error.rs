//! Error types for the Twilio client core.
//!
//! # Design
//! Construction, codec and transport failures get separate enums so callers
//! can match on the stage that failed. A non-2xx response is not an error at
//! this layer: it comes back as an `HttpResponse` for the caller to inspect.

use thiserror::Error;

/// Errors surfaced by `Client` construction and request dispatch.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("sid cannot be zero length")]
    EmptySid,

    #[error("secret cannot be zero length")]
    EmptySecret,

    /// A required environment variable was missing or not valid unicode.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response body could not be deserialized into the requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Errors from the timestamp codec.
#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("timestamp year {year} outside of range [1900,9999]")]
    OutOfRange { year: i32 },

    #[error("timestamp parse failed: {0}")]
    Parse(#[from] time::error::Parse),

    #[error("timestamp format failed: {0}")]
    Format(#[from] time::error::Format),
}

/// Errors raised by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS, connect, TLS or protocol failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The response arrived but its body could not be read.
    #[error("reading response body failed: {0}")]
    Body(String),
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        TransportError::Request(err.to_string())
    }
}
