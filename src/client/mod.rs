pub mod error;
pub mod fs;
mod session;

pub use error::Error;
pub use session::{Download, Session, SessionState, SftResult};
