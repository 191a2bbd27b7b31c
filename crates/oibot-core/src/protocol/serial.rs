//! Serial port handling
//!
//! Provides the `serialport`-backed [`Transport`] used on real hardware.

use serialport::SerialPort;
use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

use super::{Transport, TransportError};

/// Slice length used to wait on a port opened without a read timeout
const BLOCKING_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn serial_err(e: serialport::Error) -> TransportError {
    TransportError::Serial(e.to_string())
}

/// Configure a serial port for the OI: 8N1, no flow control
fn configure_port(port: &mut dyn SerialPort) -> Result<(), TransportError> {
    port.set_data_bits(serialport::DataBits::Eight)
        .map_err(serial_err)?;
    port.set_parity(serialport::Parity::None).map_err(serial_err)?;
    port.set_stop_bits(serialport::StopBits::One)
        .map_err(serial_err)?;
    port.set_flow_control(serialport::FlowControl::None)
        .map_err(serial_err)?;
    Ok(())
}

/// A real serial link to the robot
pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    name: String,
    read_timeout: Option<Duration>,
}

impl SerialTransport {
    /// Open and configure a port. A `read_timeout` of `None` (or zero) blocks reads indefinitely.
    pub fn open(
        name: &str,
        baud_rate: u32,
        read_timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let read_timeout = read_timeout.filter(|t| !t.is_zero());
        let mut port = serialport::new(name, baud_rate)
            .timeout(read_timeout.unwrap_or(BLOCKING_POLL_INTERVAL))
            .open()
            .map_err(|e| TransportError::Open {
                port: name.to_string(),
                reason: e.to_string(),
            })?;
        configure_port(port.as_mut())?;

        tracing::info!(port = name, baud_rate, ?read_timeout, "serial port opened");

        Ok(Self {
            port: Some(port),
            name: name.to_string(),
            read_timeout,
        })
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>, TransportError> {
        self.port.as_mut().ok_or(TransportError::Closed)
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        Ok(Write::write(self.port()?.as_mut(), data)?)
    }

    fn read(&mut self, buf: &mut [u8], deadline: Option<Instant>) -> Result<usize, TransportError> {
        let configured = self.read_timeout;
        let port = self.port()?;

        loop {
            let remaining = match deadline {
                Some(d) => match d.checked_duration_since(Instant::now()) {
                    Some(r) if !r.is_zero() => Some(r),
                    _ => return Err(TransportError::Timeout),
                },
                None => None,
            };
            let slice = match (configured, remaining) {
                (Some(t), Some(r)) => t.min(r),
                (Some(t), None) => t,
                (None, Some(r)) => r.min(BLOCKING_POLL_INTERVAL),
                (None, None) => BLOCKING_POLL_INTERVAL,
            };
            port.set_timeout(slice).map_err(serial_err)?;

            match Read::read(port.as_mut(), buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    if configured.is_some() {
                        return Err(TransportError::Timeout);
                    }
                    // Blocking link: keep waiting until data or the caller's deadline
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.port()?
            .as_mut()
            .clear(serialport::ClearBuffer::All)
            .map_err(serial_err)
    }

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), TransportError> {
        self.port()?.as_mut().set_baud_rate(baud_rate).map_err(serial_err)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        match self.port.take() {
            Some(port) => {
                drop(port);
                tracing::info!(port = %self.name, "serial port closed");
                Ok(())
            }
            None => Err(TransportError::Closed),
        }
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_port() {
        let result = SerialTransport::open("/dev/oibot-does-not-exist", 115200, None);
        assert!(matches!(result, Err(TransportError::Open { .. })));
    }
}
