use std::io;
use thiserror::Error;

use crate::{error, protocol::StatusCode};

/// Enum for client errors
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The server could not be reached or did not complete the handshake
    #[error("Failed to connect to {address}: {reason}")]
    Connect { address: String, reason: String },
    /// Any errors related to I/O, on the socket or on local files
    #[error("I/O: {0}")]
    IO(String),
    /// A send or receive did not complete within the configured time
    #[error("Timeout")]
    Timeout,
    /// The reply does not have the shape or status its request requires
    #[error("{command}: {source}")]
    Protocol {
        command: &'static str,
        source: error::Error,
    },
    /// Operation attempted without an open connection
    #[error("not connected to server")]
    NotConnected,
    #[error("connection is already opened")]
    AlreadyConnected,
    /// Rejected locally before anything was sent
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    UnexpectedBehavior(String),
}

impl Error {
    /// The status byte the server answered with, if the failure was a refusal.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Protocol {
                source: error::Error::Status(code),
                ..
            } => Some(*code),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::IO(error.to_string()),
        }
    }
}
