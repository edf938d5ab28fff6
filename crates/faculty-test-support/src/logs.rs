//! Captured tracing output for assertions on log lines.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing::subscriber::DefaultGuard;

#[derive(Debug, Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Installs a thread-local `fmt` subscriber at DEBUG level that writes plain
/// text lines into memory. The subscriber is removed when this value drops.
///
/// Use with the default single-threaded `#[tokio::test]` runtime so all
/// events are emitted on the capturing thread.
#[derive(Debug)]
pub struct CapturedLogs {
    buffer: SharedBuffer,
    _guard: DefaultGuard,
}

impl CapturedLogs {
    /// Start capturing on the current thread.
    #[must_use]
    pub fn start() -> Self {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        Self {
            buffer,
            _guard: guard,
        }
    }

    /// All captured lines, in emission order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.buffer.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Captured lines that contain `needle`.
    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(needle))
            .collect()
    }
}
