//! Client for the SFT protocol: a tiny request/reply file transfer protocol
//! spoken over TCP by embedded file servers (typically a microcontroller
//! serving an SD card).
//!
//! The [`transport`] layer owns the socket and hides transient link failures
//! behind a single reconnect-and-replay. The [`client`] layer drives each
//! filesystem operation over it and decodes replies with the decoder that
//! belongs to the request that produced them.

#[macro_use]
extern crate log;
#[macro_use]
extern crate async_trait;

mod buf;
/// Client side
pub mod client;
pub mod config;
pub mod error;
/// Protocol implementation
pub mod protocol;
/// Socket handling and retry policy
pub mod transport;

pub use config::{ClientConfig, ConfigError};
