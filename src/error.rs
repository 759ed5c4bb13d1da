use thiserror::Error;

use crate::protocol::StatusCode;

/// Reasons a reply does not match what its request expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unexpected reply of {actual} bytes, expected {expected}")]
    BadLength { expected: usize, actual: usize },
    #[error("server replied with status {0}")]
    Status(StatusCode),
    #[error("reply is truncated")]
    UnexpectedEof,
    #[error("{0}")]
    UnexpectedBehavior(String),
}
