mod link;
#[cfg(test)]
pub(crate) mod mock;
mod tcp;

use std::io;

use bytes::Bytes;

pub use link::Link;
pub use tcp::{TcpConnector, TcpTransport};

/// One live socket able to carry a request and bring back its reply.
///
/// A reply is whatever a single bounded read returns. Implementations never
/// assemble a reply from several reads; callers that need more bytes ask again.
#[async_trait]
pub trait Transport: Send {
    /// Writes the request, then performs one bounded read.
    /// An empty reply is returned as is.
    async fn send_receive(&mut self, request: &[u8]) -> io::Result<Bytes>;

    /// One bounded read without writing first.
    async fn receive(&mut self) -> io::Result<Bytes>;

    /// Releases the socket. Calling it again, or on a transport that failed,
    /// does nothing.
    async fn close(&mut self);
}

/// Opens transports to a server address.
#[async_trait]
pub trait Connector: Clone + Send + Sync {
    type Transport: Transport;

    async fn open(&self, address: &str) -> io::Result<Self::Transport>;
}
