use bytes::{BufMut, Bytes, BytesMut};

use super::{
    expect_len, impl_ack_request, Request, StatusCode, SFT_FINISH_DOWNLOAD, SFT_OPEN_READ,
    SFT_READ_CHUNK,
};
use crate::{buf::TryBuf, error::Error};

/// Opens a remote file for reading; the reply announces its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRead {
    pub path: String,
}

impl Request for OpenRead {
    type Reply = u32;

    const NAME: &'static str = "DOWNLOAD";

    fn encode(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(self.path.len() + 1);
        bytes.put_u8(SFT_OPEN_READ);
        bytes.put_slice(self.path.as_bytes());
        bytes.freeze()
    }

    fn decode(mut reply: Bytes) -> Result<u32, Error> {
        // the status is checked before the shape: a missing file gets a short reply
        match StatusCode::from(reply.first().copied().ok_or(Error::UnexpectedEof)?) {
            StatusCode::Ok => {}
            code => return Err(Error::Status(code)),
        }
        expect_len(&reply, 5)?;

        let _ = reply.get_u8_checked()?;
        reply.get_u32_le_checked()
    }
}

/// Pulls the next chunk of the open file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadChunk;

impl Request for ReadChunk {
    type Reply = Bytes;

    const NAME: &'static str = "DOWNLOAD chunk";

    fn encode(&self) -> Bytes {
        Bytes::from_static(&[SFT_READ_CHUNK])
    }

    fn decode(reply: Bytes) -> Result<Bytes, Error> {
        if reply.is_empty() {
            return Err(Error::UnexpectedEof);
        }

        Ok(reply)
    }
}

impl_ack_request!(FinishDownload, SFT_FINISH_DOWNLOAD, "DOWNLOAD finish");
