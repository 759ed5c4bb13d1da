use std::fmt;

pub(crate) const STATUS_OK: u8 = 220;
pub(crate) const STATUS_ENTRY: u8 = 222;

/// Leading status byte of a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// `220`
    Ok,
    /// `222`, a directory entry record follows
    Entry,
    /// Anything else: the server refused the request
    Failure(u8),
}

impl From<u8> for StatusCode {
    fn from(value: u8) -> Self {
        match value {
            STATUS_OK => Self::Ok,
            STATUS_ENTRY => Self::Entry,
            other => Self::Failure(other),
        }
    }
}

impl From<StatusCode> for u8 {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Ok => STATUS_OK,
            StatusCode::Entry => STATUS_ENTRY,
            StatusCode::Failure(other) => other,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Result of a directory maintenance request.
///
/// A refusal is an ordinary answer from the server, not an error: the
/// session remains usable and the caller decides what to report.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Refused(StatusCode),
}

impl Outcome {
    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

impl From<StatusCode> for Outcome {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Ok => Self::Done,
            code => Self::Refused(code),
        }
    }
}
