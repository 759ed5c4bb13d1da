//! Client configuration.
//!
//! Every field has a default matching what SFT servers expect, so a config
//! file only needs the values that differ:
//!
//! ```toml
//! port = 7650
//! timeout_ms = 2000
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::CHUNK_SIZE;

/// Well-known SFT server port
pub const DEFAULT_PORT: u16 = 765;
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
/// Socket buffer size, which is also the upper bound of one reply
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// Enum for configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// A reply must fit in one read and may not exceed one chunk
    #[error("buffer_size must be between 1 and {CHUNK_SIZE}, got {0}")]
    BufferSize(usize),
    #[error("timeout_ms must not be zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub port: u16,
    /// Applies separately to connecting, sending and receiving
    pub timeout_ms: u64,
    pub buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=CHUNK_SIZE).contains(&self.buffer_size) {
            return Err(ConfigError::BufferSize(self.buffer_size));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.port, 765);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.buffer_size, 256);
    }

    #[test]
    fn test_partial_toml() {
        let config = ClientConfig::from_toml("port = 7650\n").unwrap();
        assert_eq!(
            config,
            ClientConfig {
                port: 7650,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            ClientConfig::from_toml("prot = 1\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_buffer_size_bounds() {
        assert!(matches!(
            ClientConfig::from_toml("buffer_size = 0\n"),
            Err(ConfigError::BufferSize(0))
        ));
        assert!(matches!(
            ClientConfig::from_toml("buffer_size = 257\n"),
            Err(ConfigError::BufferSize(257))
        ));
        assert_eq!(
            ClientConfig::from_toml("buffer_size = 1\n").unwrap().buffer_size,
            1
        );
    }

    #[test]
    fn test_zero_timeout() {
        assert!(matches!(
            ClientConfig::from_toml("timeout_ms = 0\n"),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
