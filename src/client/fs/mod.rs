//! Local filesystem side of transfers.
//!
//! The session moves bytes between the server and any async reader or
//! writer; the functions here bind those to local files and clean up after a
//! failed download.

mod dir;
mod file;

pub use dir::ReadDir;
pub use file::{download_file, upload_file};
pub use crate::protocol::DirEntry;
