//! Report destinations used by unit tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory report destination that can be inspected after the owning registry is gone.
#[derive(Clone, Debug, Default)]
pub(crate) struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts the first write (the initialization marker) and fails every later write.
#[derive(Clone, Debug, Default)]
pub(crate) struct FailAfterFirstWrite {
    inner: SharedBuffer,
}

impl FailAfterFirstWrite {
    pub(crate) fn contents(&self) -> String {
        self.inner.contents()
    }
}

impl Write for FailAfterFirstWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.bytes.lock().unwrap().is_empty() {
            self.inner.write(buf)
        } else {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
