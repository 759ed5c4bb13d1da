use bytes::Bytes;

use super::{DirEntry, Request, StatusCode, SFT_LIST, SFT_LIST_NEXT};
use crate::error::Error;

/// Reply to a listing request: either one entry or the end of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Entry(DirEntry),
    End,
}

fn decode_listing(mut reply: Bytes) -> Result<Listing, Error> {
    match StatusCode::from(reply.first().copied().ok_or(Error::UnexpectedEof)?) {
        StatusCode::Entry => Ok(Listing::Entry(DirEntry::try_from(&mut reply)?)),
        StatusCode::Ok => Ok(Listing::End),
        code => Err(Error::Status(code)),
    }
}

/// Starts listing the current remote directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct List;

/// Asks for the entry after the one just received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListNext;

impl Request for List {
    type Reply = Listing;

    const NAME: &'static str = "DIR";

    fn encode(&self) -> Bytes {
        Bytes::from_static(&[SFT_LIST])
    }

    fn decode(reply: Bytes) -> Result<Listing, Error> {
        decode_listing(reply)
    }
}

impl Request for ListNext {
    type Reply = Listing;

    const NAME: &'static str = "DIR next";

    fn encode(&self) -> Bytes {
        Bytes::from_static(&[SFT_LIST_NEXT])
    }

    fn decode(reply: Bytes) -> Result<Listing, Error> {
        decode_listing(reply)
    }
}

#[cfg(test)]
mod test_listing {
    use super::*;

    #[test]
    fn test_end_of_listing() {
        assert_eq!(List::decode(Bytes::from_static(&[220])), Ok(Listing::End));
        assert_eq!(&ListNext.encode()[..], b"l");
    }

    #[test]
    fn test_entry() {
        let reply = Bytes::from_static(
            b"\xde\x00\x01\x02\xe8\x07\x0c\x00\x05\x00\x00\x00\x00A.BIN\0",
        );
        match ListNext::decode(reply).unwrap() {
            Listing::Entry(entry) => {
                assert_eq!(entry.name, "A.BIN");
                assert_eq!(entry.size, 5);
            }
            Listing::End => panic!("expected an entry"),
        }
    }

    #[test]
    fn test_unexpected_terminator() {
        assert_eq!(
            List::decode(Bytes::from_static(&[7])),
            Err(Error::Status(StatusCode::Failure(7)))
        );
        assert_eq!(List::decode(Bytes::new()), Err(Error::UnexpectedEof));
    }
}
