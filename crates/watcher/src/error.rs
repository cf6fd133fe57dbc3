use thiserror::Error;

/// Outcome classes of a single request to the status API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// DNS, connect, timeout or body read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {0}")]
    StatusCode(u16),

    /// 2xx response whose body reports an `error` or `code`.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Response body is not valid JSON: {0}")]
    Decode(String),
}

/// The decoded payload does not have the expected `homeworks` shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Response is empty")]
    Empty,

    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Response has no `{0}` field")]
    MissingField(&'static str),

    #[error("`homeworks` is a {found}, expected a list")]
    WrongType { found: &'static str },

    #[error("Homework #{index} is malformed: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Response could not be decoded: {0}")]
    Malformed(String),
}

/// Failures handed to the poll loop's outer recovery handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Status API returned HTTP {0}")]
    Status(u16),

    #[error("Invalid status API response: {0}")]
    Shape(#[from] ShapeError),
}
