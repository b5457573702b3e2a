//! In-memory transports with shared handles for unit tests.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use compress::{CompressionAlgorithm, ReadTransport, WriteTransport};

#[derive(Debug, Default)]
struct ReaderState {
    data: Vec<u8>,
    offset: usize,
    fills: usize,
    closes: usize,
    fail_on_fill: Option<usize>,
}

/// Read transport over a byte slice that counts fills and closes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedReader {
    state: Arc<Mutex<ReaderState>>,
}

impl ScriptedReader {
    pub(crate) fn new(data: &[u8]) -> Self {
        let state = ReaderState {
            data: data.to_vec(),
            ..ReaderState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Makes the `fill`th call to `read` (1-based) fail.
    pub(crate) fn failing_on_fill(self, fill: usize) -> Self {
        self.lock().fail_on_fill = Some(fill);
        self
    }

    pub(crate) fn fills(&self) -> usize {
        self.lock().fills
    }

    pub(crate) fn closes(&self) -> usize {
        self.lock().closes
    }

    fn lock(&self) -> MutexGuard<'_, ReaderState> {
        self.state.lock().expect("reader state poisoned")
    }
}

impl ReadTransport for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.lock();
        state.fills += 1;
        if state.fail_on_fill == Some(state.fills) {
            return Err(io::Error::other("scripted fill failure"));
        }
        let remaining = &state.data[state.offset..];
        let amount = remaining.len().min(buf.len());
        buf[..amount].copy_from_slice(&remaining[..amount]);
        state.offset += amount;
        Ok(amount)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        self.lock().closes += 1;
        Ok(())
    }

    fn algorithm(&self) -> CompressionAlgorithm {
        CompressionAlgorithm::Plain
    }
}

#[derive(Debug, Default)]
struct WriterState {
    writes: Vec<Vec<u8>>,
    attempts: usize,
    flushes: usize,
    closes: usize,
    fail_on_write: Option<usize>,
    fail_on_close: bool,
}

/// Write transport that records every successful write call.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingWriter {
    state: Arc<Mutex<WriterState>>,
}

impl RecordingWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes the `attempt`th call to `write` (1-based) fail without recording.
    pub(crate) fn failing_on_write(self, attempt: usize) -> Self {
        self.lock().fail_on_write = Some(attempt);
        self
    }

    pub(crate) fn failing_on_close(self) -> Self {
        self.lock().fail_on_close = true;
        self
    }

    pub(crate) fn writes(&self) -> Vec<Vec<u8>> {
        self.lock().writes.clone()
    }

    pub(crate) fn flushes(&self) -> usize {
        self.lock().flushes
    }

    pub(crate) fn closes(&self) -> usize {
        self.lock().closes
    }

    fn lock(&self) -> MutexGuard<'_, WriterState> {
        self.state.lock().expect("writer state poisoned")
    }
}

impl WriteTransport for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        state.attempts += 1;
        if state.fail_on_write == Some(state.attempts) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted write failure"));
        }
        state.writes.push(buf.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flushes += 1;
        Ok(())
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        let mut state = self.lock();
        state.closes += 1;
        if state.fail_on_close {
            Err(io::Error::other("scripted close failure"))
        } else {
            Ok(())
        }
    }

    fn algorithm(&self) -> CompressionAlgorithm {
        CompressionAlgorithm::Plain
    }
}
