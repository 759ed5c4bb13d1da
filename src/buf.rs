use std::mem::size_of;

use bytes::{Buf, BufMut};

use crate::error::Error;

pub trait TryBuf: Buf {
    fn get_u8_checked(&mut self) -> Result<u8, Error>;
    fn get_u16_le_checked(&mut self) -> Result<u16, Error>;
    fn get_u32_le_checked(&mut self) -> Result<u32, Error>;
    fn get_cstring(&mut self) -> String;
}

impl<T: Buf> TryBuf for T {
    fn get_u8_checked(&mut self) -> Result<u8, Error> {
        if self.remaining() < size_of::<u8>() {
            return Err(Error::UnexpectedEof);
        }

        Ok(self.get_u8())
    }

    fn get_u16_le_checked(&mut self) -> Result<u16, Error> {
        if self.remaining() < size_of::<u16>() {
            return Err(Error::UnexpectedEof);
        }

        Ok(self.get_u16_le())
    }

    fn get_u32_le_checked(&mut self) -> Result<u32, Error> {
        if self.remaining() < size_of::<u32>() {
            return Err(Error::UnexpectedEof);
        }

        Ok(self.get_u32_le())
    }

    /// Consumes the rest of the buffer and returns the text up to the first NUL,
    /// or all of it when the server left the name unterminated.
    fn get_cstring(&mut self) -> String {
        let rest = self.copy_to_bytes(self.remaining());
        let end = rest.iter().position(|&b| b == 0).unwrap_or(rest.len());
        String::from_utf8_lossy(&rest[..end]).into_owned()
    }
}

pub trait PutBuf: BufMut {
    fn put_cstr(&mut self, str: &str);
}

impl<T: BufMut> PutBuf for T {
    fn put_cstr(&mut self, str: &str) {
        self.put_slice(str.as_bytes());
        self.put_u8(0);
    }
}

#[cfg(test)]
mod test_buf {
    use bytes::{Bytes, BytesMut};

    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let mut bytes = Bytes::from_static(&[0xe8, 0x07, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(bytes.get_u16_le_checked().unwrap(), 2024);
        assert_eq!(bytes.get_u32_le_checked().unwrap(), 0x1234_5678);
        assert_eq!(bytes.get_u8_checked(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn test_short_u32() {
        let mut bytes = Bytes::from_static(&[1, 2, 3]);
        assert_eq!(bytes.get_u32_le_checked(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn test_cstring_stops_at_nul() {
        let mut bytes = Bytes::from_static(b"LOG.TXT\0garbage");
        assert_eq!(bytes.get_cstring(), "LOG.TXT");
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_cstring_without_terminator() {
        let mut bytes = Bytes::from_static(b"DATA");
        assert_eq!(bytes.get_cstring(), "DATA");
    }

    #[test]
    fn test_put_cstr() {
        let mut bytes = BytesMut::new();
        bytes.put_cstr("a.bin");
        assert_eq!(&bytes[..], b"a.bin\0");
    }
}
