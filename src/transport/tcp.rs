use std::{io, net::SocketAddr, time::Duration};

use bytes::Bytes;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{lookup_host, TcpSocket, TcpStream},
    time,
};

use super::{Connector, Transport};
use crate::config::ClientConfig;

fn timed_out(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, format!("{what} timed out"))
}

/// TCP transport with fixed timeouts and small socket buffers, sized for
/// servers that have little RAM to spare.
#[derive(Debug)]
pub struct TcpTransport {
    stream: Option<TcpStream>,
    timeout: Duration,
    buffer_size: usize,
}

impl TcpTransport {
    /// Connects to `address` on the configured port. Each resolved address is
    /// tried in turn; the last failure is returned.
    pub async fn connect(address: &str, config: &ClientConfig) -> io::Result<Self> {
        config
            .validate()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

        let mut last_error = None;

        for addr in lookup_host((address, config.port)).await? {
            match Self::connect_addr(addr, config).await {
                Ok(stream) => {
                    debug!("connected to {}", addr);
                    return Ok(Self {
                        stream: Some(stream),
                        timeout: config.timeout(),
                        buffer_size: config.buffer_size,
                    });
                }
                Err(err) => {
                    debug!("connection to {} failed: {}", addr, err);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no address found for {address}"),
            )
        }))
    }

    async fn connect_addr(addr: SocketAddr, config: &ClientConfig) -> io::Result<TcpStream> {
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };

        let buffer_size = u32::try_from(config.buffer_size).unwrap_or(u32::MAX);
        socket.set_send_buffer_size(buffer_size)?;
        socket.set_recv_buffer_size(buffer_size)?;

        let stream = time::timeout(config.timeout(), socket.connect(addr))
            .await
            .map_err(|_| timed_out("connect"))??;
        stream.set_nodelay(true)?;

        Ok(stream)
    }

    fn stream(&mut self) -> io::Result<&mut TcpStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "transport is closed"))
    }

    async fn read_reply(&mut self) -> io::Result<Bytes> {
        let timeout = self.timeout;
        let mut buf = vec![0; self.buffer_size];

        let stream = self.stream()?;
        let len = time::timeout(timeout, stream.read(&mut buf))
            .await
            .map_err(|_| timed_out("receive"))??;

        buf.truncate(len);
        Ok(Bytes::from(buf))
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn send_receive(&mut self, request: &[u8]) -> io::Result<Bytes> {
        let timeout = self.timeout;
        let stream = self.stream()?;

        time::timeout(timeout, async {
            stream.write_all(request).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| timed_out("send"))??;

        self.read_reply().await
    }

    async fn receive(&mut self) -> io::Result<Bytes> {
        self.read_reply().await
    }

    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
        }
    }
}

/// Opens [`TcpTransport`]s with a shared configuration.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    config: ClientConfig,
}

impl TcpConnector {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Connector for TcpConnector {
    type Transport = TcpTransport;

    async fn open(&self, address: &str) -> io::Result<TcpTransport> {
        TcpTransport::connect(address, &self.config).await
    }
}
