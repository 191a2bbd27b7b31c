//! Open Interface Protocol
//!
//! Frame encoding, argument validation, the transport abstraction and
//! the command/query driver built on top of them.

pub mod actuators;
mod driver;
mod error;
pub mod frame;
pub mod serial;
pub mod transport;
pub mod validate;

use std::time::Duration;

pub use actuators::{LedState, MotorState};
pub use driver::Driver;
pub use error::{DecodeError, Error, Result, TransportError, ValidationError, Wheel};
pub use frame::{pack, Field, Frame, FrameBuilder};
pub use serial::SerialTransport;
pub use transport::{ReadPolicy, Transport};

/// Default baud rate for OI communication
pub const DEFAULT_BAUD_RATE: u32 = 115200;

/// Default read timeout in milliseconds
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Pause after every physical write; the OI loses bytes sent faster than this
pub const SERIAL_TRANSFER_DELAY: Duration = Duration::from_millis(20);

/// Pause after a Baud command before the host retunes its own port
pub const BAUD_CHANGE_DELAY: Duration = Duration::from_millis(100);
