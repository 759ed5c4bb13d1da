//! Scripted in-memory transport for exercising the retry policy and the
//! session without a server.

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex, MutexGuard},
};

use bytes::{BufMut, Bytes, BytesMut};

use super::{Connector, Transport};

/// Builds a listing reply for an entry dated 14/07/2023 09:41.
pub(crate) fn entry_record(name: &str, size: u32, is_dir: bool) -> Bytes {
    let mut bytes = BytesMut::new();
    bytes.put_slice(&[222, 0, 14, 7]);
    bytes.put_u16_le(2023);
    bytes.put_slice(&[9, 41]);
    bytes.put_u32_le(size);
    bytes.put_u8(u8::from(is_dir));
    bytes.put_slice(name.as_bytes());
    bytes.put_u8(0);
    bytes.freeze()
}

/// What the fake server does with the next exchange.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Reply(Bytes),
    Fail,
}

impl Step {
    pub(crate) fn reply(bytes: &[u8]) -> Self {
        Self::Reply(Bytes::copy_from_slice(bytes))
    }
}

#[derive(Debug, Default)]
struct Script {
    steps: VecDeque<Step>,
    sent: Vec<Vec<u8>>,
    opens: usize,
    closes: usize,
    refuse: bool,
}

/// Every transport opened from one connector (and its clones) consumes the
/// same script and records into the same log.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockConnector {
    script: Arc<Mutex<Script>>,
}

impl MockConnector {
    pub(crate) fn new<I: IntoIterator<Item = Step>>(steps: I) -> Self {
        let connector = Self::default();
        connector.lock().steps.extend(steps);
        connector
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub(crate) fn push(&self, step: Step) {
        self.lock().steps.push_back(step);
    }

    /// Makes every following `open` fail.
    pub(crate) fn refuse_opens(&self) {
        self.lock().refuse = true;
    }

    /// Requests written so far, in order, including replays.
    pub(crate) fn sent(&self) -> Vec<Vec<u8>> {
        self.lock().sent.clone()
    }

    pub(crate) fn opens(&self) -> usize {
        self.lock().opens
    }

    pub(crate) fn closes(&self) -> usize {
        self.lock().closes
    }

    pub(crate) fn remaining(&self) -> usize {
        self.lock().steps.len()
    }
}

pub(crate) struct MockTransport {
    script: Arc<Mutex<Script>>,
    closed: bool,
}

impl MockTransport {
    fn next_reply(&mut self) -> io::Result<Bytes> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "closed"));
        }

        match self.script.lock().unwrap().steps.pop_front() {
            Some(Step::Reply(bytes)) => Ok(bytes),
            Some(Step::Fail) => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted")),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_receive(&mut self, request: &[u8]) -> io::Result<Bytes> {
        if !self.closed {
            self.script.lock().unwrap().sent.push(request.to_vec());
        }
        self.next_reply()
    }

    async fn receive(&mut self) -> io::Result<Bytes> {
        self.next_reply()
    }

    async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.script.lock().unwrap().closes += 1;
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Transport = MockTransport;

    async fn open(&self, _address: &str) -> io::Result<MockTransport> {
        let refused = {
            let mut script = self.lock();
            script.opens += 1;
            script.refuse
        };
        if refused {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        }

        Ok(MockTransport {
            script: self.script.clone(),
            closed: false,
        })
    }
}
