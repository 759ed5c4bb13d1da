use std::collections::VecDeque;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{error::Error, fs::ReadDir};
use crate::{
    config::ClientConfig,
    protocol::{
        ChangeDir, Chunk, Connect, CreateFile, FinishDownload, FinishUpload, List, ListNext,
        Listing, MakeDir, OpenRead, Outcome, ReadChunk, RemoveDir, RemoveFile, Request, Version,
        WorkingDir, CHUNK_SIZE,
    },
    transport::{Connector, Link, TcpConnector},
};

pub type SftResult<T> = Result<T, Error>;

/// Whether a [`Session`] accepts file and directory operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
}

enum State<C: Connector> {
    Disconnected,
    Connected { link: Link<C>, version: Version },
}

/// Sends one request and decodes its reply with the request's own decoder.
async fn exchange<C, R>(link: &mut Link<C>, request: &R) -> SftResult<R::Reply>
where
    C: Connector,
    R: Request,
{
    let frame = request.encode();
    debug!("{}: sending {} bytes", R::NAME, frame.len());

    let reply = link.send_receive(&frame).await?;
    debug!("{}: received {} bytes", R::NAME, reply.len());

    R::decode(reply).map_err(|source| Error::Protocol {
        command: R::NAME,
        source,
    })
}

/// One logical connection to one SFT server.
///
/// Requests are strictly sequential: every operation takes `&mut self` and
/// returns only once its last reply has arrived.
///
/// Connecting, uploading and downloading fail hard: any mismatch aborts the
/// operation with an error. Changing, creating and removing directories and
/// deleting files fail soft: a refusal by the server comes back as
/// [`Outcome::Refused`] and the session stays usable.
pub struct Session<C: Connector = TcpConnector> {
    connector: C,
    state: State<C>,
}

impl Session {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_connector(TcpConnector::new(config))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<C: Connector> Session<C> {
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector,
            state: State::Disconnected,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.state {
            State::Disconnected => SessionState::Disconnected,
            State::Connected { .. } => SessionState::Connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == SessionState::Connected
    }

    /// Version reported by the server at handshake
    pub fn version(&self) -> Option<Version> {
        match &self.state {
            State::Connected { version, .. } => Some(*version),
            State::Disconnected => None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match &self.state {
            State::Connected { link, .. } => Some(link.address()),
            State::Disconnected => None,
        }
    }

    fn link(&mut self) -> SftResult<&mut Link<C>> {
        match &mut self.state {
            State::Connected { link, .. } => Ok(link),
            State::Disconnected => Err(Error::NotConnected),
        }
    }

    /// Opens the connection and performs the handshake. On any failure the
    /// session stays disconnected.
    pub async fn connect(&mut self, address: &str) -> SftResult<Version> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let address = address.trim();
        if address.is_empty() {
            return Err(Error::InvalidArgument("missing address".to_owned()));
        }

        let failed = |reason: String| Error::Connect {
            address: address.to_owned(),
            reason,
        };

        let mut link = Link::open(self.connector.clone(), address)
            .await
            .map_err(|err| failed(err.to_string()))?;

        match exchange(&mut link, &Connect).await {
            Ok(version) => {
                info!("connected to {}, server version {}", address, version);
                self.state = State::Connected { link, version };
                Ok(version)
            }
            Err(err) => {
                link.close().await;
                Err(failed(err.to_string()))
            }
        }
    }

    /// Drops the connection. Nothing is sent to the server.
    pub async fn disconnect(&mut self) {
        if let State::Connected { mut link, .. } =
            std::mem::replace(&mut self.state, State::Disconnected)
        {
            link.close().await;
            info!("disconnected from {}", link.address());
        }
    }

    async fn request<R: Request>(&mut self, request: &R) -> SftResult<R::Reply> {
        exchange(self.link()?, request).await
    }

    /// Writes `len` bytes from `source` to the remote file `remote`, in the
    /// current remote directory.
    ///
    /// Every chunk must be acknowledged before the next one is sent. If the
    /// upload aborts, the remote file may be left truncated.
    pub async fn upload<R>(&mut self, remote: &str, source: &mut R, len: u64) -> SftResult<()>
    where
        R: AsyncRead + Unpin,
    {
        let link = self.link()?;
        let len = u32::try_from(len).map_err(|_| {
            Error::InvalidArgument(format!("{len} bytes exceed the largest transferable file"))
        })?;

        exchange(
            link,
            &CreateFile {
                path: remote.to_owned(),
                len,
            },
        )
        .await?;

        let mut buffer = [0; CHUNK_SIZE];
        let mut remaining = len as usize;
        while remaining > 0 {
            let size = remaining.min(CHUNK_SIZE);
            let _ = source
                .read_exact(&mut buffer[..size])
                .await
                .map_err(|err| match err.kind() {
                    std::io::ErrorKind::UnexpectedEof => Error::UnexpectedBehavior(format!(
                        "source ended {remaining} bytes short of {len}"
                    )),
                    _ => err.into(),
                })?;

            exchange(link, &Chunk::from(&buffer[..size])).await?;
            remaining -= size;
        }

        exchange(link, &FinishUpload).await?;
        info!("uploaded {} bytes to {}", len, remote);
        Ok(())
    }

    /// Opens the remote file `remote` for reading. Nothing is transferred
    /// until [`Download::copy_to`] is called, so the caller can prepare the
    /// destination knowing the file exists.
    pub async fn open_download(&mut self, remote: &str) -> SftResult<Download<'_, C>> {
        let link = self.link()?;
        let len = exchange(
            link,
            &OpenRead {
                path: remote.to_owned(),
            },
        )
        .await?;

        Ok(Download {
            link,
            len: u64::from(len),
        })
    }

    /// Copies the remote file `remote` into `sink` and returns its length.
    pub async fn download<W>(&mut self, remote: &str, sink: &mut W) -> SftResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        self.open_download(remote).await?.copy_to(sink).await
    }

    /// Lists the current remote directory, one round trip per entry.
    pub async fn read_dir(&mut self) -> SftResult<ReadDir> {
        let link = self.link()?;
        let mut entries = VecDeque::new();

        let mut listing = exchange(link, &List).await?;
        while let Listing::Entry(entry) = listing {
            entries.push_back(entry);
            listing = exchange(link, &ListNext).await?;
        }

        debug!("listed {} entries", entries.len());
        Ok(ReadDir { entries })
    }

    /// Changes the current remote directory. An empty `name` leaves it
    /// unchanged; the reply always carries the current directory.
    pub async fn change_dir(&mut self, name: &str) -> SftResult<WorkingDir> {
        self.request(&ChangeDir::new(name)).await
    }

    pub async fn make_dir(&mut self, name: &str) -> SftResult<Outcome> {
        self.request(&MakeDir::new(name)).await
    }

    pub async fn remove_file(&mut self, name: &str) -> SftResult<Outcome> {
        self.request(&RemoveFile::new(name)).await
    }

    /// The directory must be empty or the server refuses.
    pub async fn remove_dir(&mut self, name: &str) -> SftResult<Outcome> {
        self.request(&RemoveDir::new(name)).await
    }
}

/// A remote file opened for reading.
pub struct Download<'a, C: Connector> {
    link: &'a mut Link<C>,
    len: u64,
}

impl<C: Connector> Download<'_, C> {
    /// Length announced by the server
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pulls chunks into `sink` until the announced length is reached, then
    /// closes the transfer. An empty chunk aborts. Bytes past the announced
    /// length are dropped.
    pub async fn copy_to<W>(self, sink: &mut W) -> SftResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut received = 0;

        while received < self.len {
            let mut chunk = exchange(&mut *self.link, &ReadChunk).await?;

            let wanted = usize::try_from(self.len - received).unwrap_or(usize::MAX);
            if chunk.len() > wanted {
                warn!(
                    "{}: dropping {} bytes past the announced length of {}",
                    ReadChunk::NAME,
                    chunk.len() - wanted,
                    self.len
                );
                chunk.truncate(wanted);
            }

            received += chunk.len() as u64;
            sink.write_all(&chunk).await?;
        }
        sink.flush().await?;

        exchange(&mut *self.link, &FinishDownload).await?;
        info!("downloaded {} bytes", received);
        Ok(received)
    }
}
