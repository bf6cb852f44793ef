//! Log output to stderr, held back while the terminal UI owns the screen.

use std::{
    io::{self, Write as _},
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing_subscriber::EnvFilter;

/// Bytes logged while the UI is active; `None` when writing through.
static HELD: Mutex<Option<Vec<u8>>> = Mutex::new(None);

fn held() -> MutexGuard<'static, Option<Vec<u8>>> {
    HELD.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Installs the global subscriber: `RUST_LOG` if set, `info` otherwise.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| LogWriter)
        .init();
}

/// Buffers log lines until [`release`].
pub fn hold() {
    let mut guard = held();
    if guard.is_none() {
        *guard = Some(Vec::new());
    }
}

/// Writes the buffered lines to stderr and resumes writing through.
pub fn release() {
    if let Some(bytes) = take_held() {
        // nowhere left to report a failing stderr
        let _ = io::stderr().write_all(&bytes);
    }
}

fn take_held() -> Option<Vec<u8>> {
    held().take()
}

#[derive(Debug)]
struct LogWriter;

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match held().as_mut() {
            Some(bytes) => {
                bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match held().as_ref() {
            Some(_) => Ok(()),
            None => io::stderr().flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_lines_are_released_in_order() {
        hold();
        LogWriter.write_all(b"first\n").unwrap();
        // holding twice keeps what is already buffered
        hold();
        LogWriter.write_all(b"second\n").unwrap();
        LogWriter.flush().unwrap();

        assert_eq!(take_held(), Some(b"first\nsecond\n".to_vec()));
        assert_eq!(take_held(), None);
    }
}
