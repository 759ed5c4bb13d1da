//! Directory maintenance requests. These send the name without a
//! terminator, unlike [`CreateFile`](super::CreateFile), and are answered by
//! a status byte whose failure is reported rather than raised.

use bytes::{BufMut, Bytes, BytesMut};

use super::{
    Outcome, Request, StatusCode, SFT_CHANGE_DIR, SFT_MAKE_DIR, SFT_REMOVE_DIR, SFT_REMOVE_FILE,
};
use crate::{buf::TryBuf, error::Error};

fn encode_named(command: u8, name: &str) -> Bytes {
    let mut bytes = BytesMut::with_capacity(name.len() + 1);
    bytes.put_u8(command);
    bytes.put_slice(name.as_bytes());
    bytes.freeze()
}

macro_rules! impl_maintenance_request {
    ($(#[$meta:meta])* $name:ident, $command:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub name: String,
        }

        impl $name {
            pub fn new<T: Into<String>>(name: T) -> Self {
                Self { name: name.into() }
            }
        }

        impl Request for $name {
            type Reply = Outcome;

            const NAME: &'static str = $label;

            fn encode(&self) -> Bytes {
                encode_named($command, &self.name)
            }

            fn decode(mut reply: Bytes) -> Result<Outcome, Error> {
                Ok(StatusCode::from(reply.get_u8_checked()?).into())
            }
        }
    };
}

impl_maintenance_request!(
    /// Creates a directory inside the current remote directory.
    MakeDir,
    SFT_MAKE_DIR,
    "MKDIR"
);
impl_maintenance_request!(
    /// Deletes a file from the current remote directory.
    RemoveFile,
    SFT_REMOVE_FILE,
    "DEL"
);
impl_maintenance_request!(
    /// Deletes an empty directory from the current remote directory.
    RemoveDir,
    SFT_REMOVE_DIR,
    "RMDIR"
);

/// Changes the current remote directory. An empty name only reports the
/// current directory; `..` moves one level up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDir {
    pub name: String,
}

impl ChangeDir {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self { name: name.into() }
    }
}

/// Reply to [`ChangeDir`]: the server reports its current directory whether
/// or not the change succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDir {
    pub outcome: Outcome,
    pub path: String,
}

impl Request for ChangeDir {
    type Reply = WorkingDir;

    const NAME: &'static str = "CD";

    fn encode(&self) -> Bytes {
        encode_named(SFT_CHANGE_DIR, &self.name)
    }

    fn decode(mut reply: Bytes) -> Result<WorkingDir, Error> {
        let outcome = StatusCode::from(reply.get_u8_checked()?).into();
        Ok(WorkingDir {
            outcome,
            path: reply.get_cstring(),
        })
    }
}
