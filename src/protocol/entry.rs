use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime};

use crate::{buf::TryBuf, error::Error};

/// One row of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub size: u32,
    pub is_dir: bool,
    /// `None` when the server reports a date that is not a valid calendar
    /// value, as FAT volumes do for files written without a clock.
    pub modified: Option<NaiveDateTime>,
}

impl DirEntry {
    /// Marker byte, date/time, size and flag precede the name
    pub(crate) const HEADER_LEN: usize = 13;
}

/// Record layout, all integers little-endian:
/// marker, reserved, day, month, year (u16), hour, minute, size (u32),
/// directory flag, then the name up to a NUL or the end of the reply.
impl TryFrom<&mut Bytes> for DirEntry {
    type Error = Error;

    fn try_from(bytes: &mut Bytes) -> Result<Self, Self::Error> {
        if bytes.len() < Self::HEADER_LEN {
            return Err(Error::BadLength {
                expected: Self::HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let _marker = bytes.get_u8_checked()?;
        let _reserved = bytes.get_u8_checked()?;
        let day = bytes.get_u8_checked()?;
        let month = bytes.get_u8_checked()?;
        let year = bytes.get_u16_le_checked()?;
        let hour = bytes.get_u8_checked()?;
        let minute = bytes.get_u8_checked()?;
        let size = bytes.get_u32_le_checked()?;
        let is_dir = bytes.get_u8_checked()? == 1;

        let modified = NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
            .and_then(|date| date.and_hms_opt(hour.into(), minute.into(), 0));

        Ok(Self {
            name: bytes.get_cstring(),
            size,
            is_dir,
            modified,
        })
    }
}

#[cfg(test)]
mod test_dir_entry {
    use bytes::BytesMut;

    use super::*;
    use crate::transport::mock::entry_record as record;

    #[test]
    fn test_entry_from_bytes() {
        let mut bytes = record("LOG.TXT", 123_456, false);
        let entry = DirEntry::try_from(&mut bytes).unwrap();

        assert_eq!(entry.name, "LOG.TXT");
        assert_eq!(entry.size, 123_456);
        assert!(!entry.is_dir);
        assert_eq!(
            entry.modified,
            NaiveDate::from_ymd_opt(2023, 7, 14)
                .unwrap()
                .and_hms_opt(9, 41, 0)
        );
    }

    #[test]
    fn test_directory_entry() {
        let mut bytes = record("SUB", 0, true);
        let entry = DirEntry::try_from(&mut bytes).unwrap();
        assert!(entry.is_dir);
        assert_eq!(entry.name, "SUB");
    }

    #[test]
    fn test_unterminated_name() {
        let full = record("NAME", 1, false);
        let mut bytes = full.slice(..full.len() - 1);
        assert_eq!(DirEntry::try_from(&mut bytes).unwrap().name, "NAME");
    }

    #[test]
    fn test_invalid_date() {
        let mut bytes = BytesMut::from(&record("X", 1, false)[..]);
        bytes[2] = 0;
        bytes[3] = 0;
        let entry = DirEntry::try_from(&mut bytes.freeze()).unwrap();
        assert_eq!(entry.modified, None);
    }

    #[test]
    fn test_truncated_record() {
        let mut bytes = Bytes::from_static(&[222, 0, 1, 1, 0xe7, 0x07]);
        assert_eq!(
            DirEntry::try_from(&mut bytes),
            Err(Error::BadLength {
                expected: 13,
                actual: 6
            })
        );
    }
}
