use std::io;

use bytes::Bytes;

use super::{Connector, Transport};

/// The connection a session talks through.
///
/// Wraps the current transport with the single-retry policy: when an
/// exchange fails at the socket level or comes back empty, the transport is
/// replaced by a fresh one to the same address and the same request is sent
/// once more. Whatever the second attempt yields is final.
///
/// Every request is replayed the same way, including data chunks: if only
/// the acknowledgement was lost, the server sees the chunk twice.
pub struct Link<C: Connector> {
    connector: C,
    address: String,
    transport: C::Transport,
}

impl<C: Connector> Link<C> {
    /// Opens the first transport. Failure here is not retried.
    pub async fn open<A: Into<String>>(connector: C, address: A) -> io::Result<Self> {
        let address = address.into();
        let transport = connector.open(&address).await?;

        Ok(Self {
            connector,
            address,
            transport,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sends `request` and returns its reply, reconnecting and resending at
    /// most once.
    pub async fn send_receive(&mut self, request: &[u8]) -> io::Result<Bytes> {
        match self.transport.send_receive(request).await {
            Ok(reply) if !reply.is_empty() => return Ok(reply),
            Ok(_) => warn!("empty reply from {}, reconnecting", self.address),
            Err(err) => warn!("exchange with {} failed: {}, reconnecting", self.address, err),
        }

        self.reconnect().await?;
        self.transport.send_receive(request).await
    }

    /// Reads a reply that is already on its way. Never retried: there is
    /// no request to replay.
    pub async fn receive(&mut self) -> io::Result<Bytes> {
        self.transport.receive().await
    }

    async fn reconnect(&mut self) -> io::Result<()> {
        self.transport.close().await;
        self.transport = self.connector.open(&self.address).await?;
        debug!("reconnected to {}", self.address);
        Ok(())
    }

    pub async fn close(&mut self) {
        self.transport.close().await;
    }
}

#[cfg(test)]
mod test_link {
    use super::*;
    use crate::transport::mock::{MockConnector, Step};

    #[tokio::test]
    async fn test_no_retry_on_success() {
        let connector = MockConnector::new([Step::reply(&[3, 1])]);
        let mut link = Link::open(connector.clone(), "sd.local").await.unwrap();

        assert_eq!(&link.send_receive(b"C").await.unwrap()[..], &[3, 1]);
        assert_eq!(connector.opens(), 1);
        assert_eq!(connector.sent(), vec![b"C".to_vec()]);
    }

    #[tokio::test]
    async fn test_retry_after_failure_replays_request() {
        let always_ok = MockConnector::new([Step::reply(&[220])]);
        let mut reference = Link::open(always_ok, "sd.local").await.unwrap();
        let expected = reference.send_receive(b"MLOGS").await.unwrap();

        let connector = MockConnector::new([Step::Fail, Step::reply(&[220])]);
        let mut link = Link::open(connector.clone(), "sd.local").await.unwrap();

        assert_eq!(link.send_receive(b"MLOGS").await.unwrap(), expected);
        assert_eq!(connector.opens(), 2);
        assert_eq!(connector.sent(), vec![b"MLOGS".to_vec(), b"MLOGS".to_vec()]);
    }

    #[tokio::test]
    async fn test_retry_after_empty_reply() {
        let connector = MockConnector::new([Step::reply(&[]), Step::reply(&[220])]);
        let mut link = Link::open(connector.clone(), "sd.local").await.unwrap();

        assert_eq!(&link.send_receive(b"u").await.unwrap()[..], &[220]);
        assert_eq!(connector.opens(), 2);
        assert_eq!(connector.closes(), 1);
    }

    #[tokio::test]
    async fn test_second_failure_is_final() {
        let connector = MockConnector::new([Step::Fail, Step::Fail, Step::reply(&[220])]);
        let mut link = Link::open(connector.clone(), "sd.local").await.unwrap();

        let error = link.send_receive(b"L").await.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(connector.sent().len(), 2);
        assert_eq!(connector.opens(), 2);
        assert_eq!(connector.remaining(), 1);
    }

    #[tokio::test]
    async fn test_second_empty_reply_is_returned() {
        let connector = MockConnector::new([Step::reply(&[]), Step::reply(&[])]);
        let mut link = Link::open(connector.clone(), "sd.local").await.unwrap();

        assert!(link.send_receive(b"w").await.unwrap().is_empty());
        assert_eq!(connector.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_reconnect_refused() {
        let connector = MockConnector::new([Step::Fail]);
        let mut link = Link::open(connector.clone(), "sd.local").await.unwrap();
        connector.refuse_opens();

        let error = link.send_receive(b"C").await.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::ConnectionRefused);
        assert_eq!(connector.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_open_is_not_retried() {
        let connector = MockConnector::default();
        connector.refuse_opens();

        assert!(Link::open(connector.clone(), "sd.local").await.is_err());
        assert_eq!(connector.opens(), 1);
    }

    #[tokio::test]
    async fn test_receive_does_not_retry() {
        let connector = MockConnector::new([Step::reply(&[])]);
        let mut link = Link::open(connector.clone(), "sd.local").await.unwrap();

        assert!(link.receive().await.unwrap().is_empty());
        assert_eq!(connector.opens(), 1);
    }
}
