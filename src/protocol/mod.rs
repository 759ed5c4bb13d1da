mod connect;
mod download;
mod entry;
mod listing;
mod maintenance;
mod status;
mod upload;

use bytes::Bytes;

use crate::error::Error;

pub use self::{
    connect::{Connect, Version},
    download::{FinishDownload, OpenRead, ReadChunk},
    entry::DirEntry,
    listing::{List, ListNext, Listing},
    maintenance::{ChangeDir, MakeDir, RemoveDir, RemoveFile, WorkingDir},
    status::{Outcome, StatusCode},
    upload::{Chunk, CreateFile, FinishUpload},
};

/// Size of one file payload unit, in both directions.
pub const CHUNK_SIZE: usize = 256;

const SFT_CONNECT: u8 = b'C';
const SFT_CREATE_FILE: u8 = b'U';
const SFT_FINISH_UPLOAD: u8 = b'u';
const SFT_OPEN_READ: u8 = b'W';
const SFT_READ_CHUNK: u8 = b'w';
const SFT_FINISH_DOWNLOAD: u8 = b'?';
const SFT_LIST: u8 = b'L';
const SFT_LIST_NEXT: u8 = b'l';
const SFT_CHANGE_DIR: u8 = b'D';
const SFT_MAKE_DIR: u8 = b'M';
const SFT_REMOVE_FILE: u8 = b'x';
const SFT_REMOVE_DIR: u8 = b'X';

/// A request frame paired with the decoder of the reply it provokes.
///
/// Replies carry no tag of their own, so the only way to interpret one is
/// through the request that was sent.
pub trait Request {
    type Reply;

    /// Short name used in logs and error reports
    const NAME: &'static str;

    fn encode(&self) -> Bytes;

    fn decode(reply: Bytes) -> Result<Self::Reply, Error>;
}

/// Declares a request made of a single command byte and acknowledged by a
/// lone `220`.
macro_rules! impl_ack_request {
    ($name:ident, $command:expr, $label:literal) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $crate::protocol::Request for $name {
            type Reply = ();

            const NAME: &'static str = $label;

            fn encode(&self) -> bytes::Bytes {
                bytes::Bytes::from_static(&[$command])
            }

            fn decode(reply: bytes::Bytes) -> Result<(), $crate::error::Error> {
                $crate::protocol::decode_ack(&reply)
            }
        }
    };
}

pub(crate) use impl_ack_request;

fn expect_len(reply: &Bytes, expected: usize) -> Result<(), Error> {
    if reply.len() == expected {
        Ok(())
    } else {
        Err(Error::BadLength {
            expected,
            actual: reply.len(),
        })
    }
}

/// A lone status byte which must be `220`.
pub(crate) fn decode_ack(reply: &Bytes) -> Result<(), Error> {
    expect_len(reply, 1)?;
    match StatusCode::from(reply[0]) {
        StatusCode::Ok => Ok(()),
        code => Err(Error::Status(code)),
    }
}
