use std::fmt;

use bytes::Bytes;

use super::{expect_len, Request, SFT_CONNECT};
use crate::error::Error;

/// Handshake request, answered with the server protocol version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Connect;

/// Server protocol version, reported once per connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Request for Connect {
    type Reply = Version;

    const NAME: &'static str = "CONNECT";

    fn encode(&self) -> Bytes {
        Bytes::from_static(&[SFT_CONNECT])
    }

    fn decode(reply: Bytes) -> Result<Version, Error> {
        expect_len(&reply, 2)?;
        // minor comes first on the wire
        Ok(Version {
            major: reply[1],
            minor: reply[0],
        })
    }
}
