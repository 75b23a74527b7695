//! Error types for the styles client.
//!
//! # Design
//! Every operation succeeds on exactly one status code. Any other status
//! lands in `UnexpectedStatus` with the raw code and body, so callers can
//! still branch on the code. Transport failures and decode failures get
//! their own variants instead of being folded into a status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("base URL cannot be a base: {0}")]
    CannotBeABase(String),

    /// The style name is empty, `.` or `..`, none of which can be sent as a
    /// path segment.
    #[error("invalid style name: {0:?}")]
    InvalidStyleName(String),

    /// The server answered with a status other than the expected one.
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl StyleError {
    /// Status code carried by an `UnexpectedStatus`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            StyleError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
