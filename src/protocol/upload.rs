use bytes::{BufMut, Bytes, BytesMut};

use super::{decode_ack, impl_ack_request, Request, CHUNK_SIZE, SFT_CREATE_FILE, SFT_FINISH_UPLOAD};
use crate::{buf::PutBuf, error::Error};

/// Creates the remote file that the following chunks are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFile {
    pub path: String,
    pub len: u32,
}

impl Request for CreateFile {
    type Reply = ();

    const NAME: &'static str = "UPLOAD";

    fn encode(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(self.path.len() + 6);
        bytes.put_u8(SFT_CREATE_FILE);
        bytes.put_cstr(&self.path);
        bytes.put_u32_le(self.len);
        bytes.freeze()
    }

    fn decode(reply: Bytes) -> Result<(), Error> {
        decode_ack(&reply)
    }
}

/// Raw file payload. The frame has no command byte: while an upload is open
/// the server takes every request as file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub data: Bytes,
}

impl From<&[u8]> for Chunk {
    fn from(data: &[u8]) -> Self {
        debug_assert!(data.len() <= CHUNK_SIZE);
        Self {
            data: Bytes::copy_from_slice(data),
        }
    }
}

impl Request for Chunk {
    type Reply = ();

    const NAME: &'static str = "UPLOAD chunk";

    fn encode(&self) -> Bytes {
        self.data.clone()
    }

    fn decode(reply: Bytes) -> Result<(), Error> {
        decode_ack(&reply)
    }
}

impl_ack_request!(FinishUpload, SFT_FINISH_UPLOAD, "UPLOAD finish");

#[cfg(test)]
mod test_upload {
    use super::*;
    use crate::protocol::StatusCode;

    #[test]
    fn test_bytes_from_create_file() {
        let packet = CreateFile {
            path: "LOG.TXT".to_owned(),
            len: 600,
        };
        assert_eq!(&packet.encode()[..], b"ULOG.TXT\0\x58\x02\x00\x00");
    }

    #[test]
    fn test_create_file_refused() {
        assert_eq!(
            CreateFile::decode(Bytes::from_static(&[4])),
            Err(Error::Status(StatusCode::Failure(4)))
        );
    }

    #[test]
    fn test_chunk_is_sent_verbatim() {
        let chunk = Chunk::from(&b"Ux\0"[..]);
        assert_eq!(&chunk.encode()[..], b"Ux\0");
    }

    #[test]
    fn test_finish_upload() {
        assert_eq!(&FinishUpload.encode()[..], b"u");
        assert_eq!(FinishUpload::decode(Bytes::from_static(&[220])), Ok(()));
    }
}
