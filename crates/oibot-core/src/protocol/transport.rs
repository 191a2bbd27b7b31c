//! Byte transport
//!
//! The driver talks to the robot through this trait. `SerialTransport`
//! implements it for real ports; tests substitute an in-memory link.

use std::time::{Duration, Instant};

use super::TransportError;

/// Byte-level half-duplex link to the device
pub trait Transport {
    /// Write `data`, returning how many bytes the link accepted
    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError>;

    /// Read up to `buf.len()` bytes. A short read is not an error.
    ///
    /// When `deadline` is set the read must give up with
    /// [`TransportError::Timeout`] once it has passed, even if the link
    /// itself was opened without a timeout.
    fn read(&mut self, buf: &mut [u8], deadline: Option<Instant>) -> Result<usize, TransportError>;

    /// Discard anything buffered in either direction
    fn flush(&mut self) -> Result<(), TransportError>;

    /// Reconfigure the local line speed
    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), TransportError>;

    /// Release the underlying handle
    fn close(&mut self) -> Result<(), TransportError>;

    /// Read timeout the link was opened with; `None` blocks indefinitely
    fn read_timeout(&self) -> Option<Duration>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        (**self).write(data)
    }

    fn read(&mut self, buf: &mut [u8], deadline: Option<Instant>) -> Result<usize, TransportError> {
        (**self).read(buf, deadline)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        (**self).flush()
    }

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), TransportError> {
        (**self).set_baud_rate(baud_rate)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }

    fn read_timeout(&self) -> Option<Duration> {
        (**self).read_timeout()
    }
}

/// What a query does when its read loop fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Bounded timeout: degrade to "no data"
    Degrade,
    /// Indefinite blocking: the failure is fatal for the call
    Propagate,
}

impl ReadPolicy {
    /// Policy implied by a transport's read timeout
    pub fn for_timeout(timeout: Option<Duration>) -> Self {
        match timeout {
            Some(t) if !t.is_zero() => ReadPolicy::Degrade,
            _ => ReadPolicy::Propagate,
        }
    }
}
