//! # oibot Core Library
//!
//! Host-side driver for robots speaking the iRobot Open Interface over a
//! serial link.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - The static protocol catalog (opcodes, sensor packets, groups, baud codes)
//! - Frame encoding with argument validation
//! - A transport abstraction with partial-read accumulation and timeout policy
//! - Sensor decoding into typed values and status records
//! - Heading classification for display
//!
//! ## Example
//!
//! ```rust,ignore
//! use oibot_core::{config::DriverConfig, protocol::Driver};
//!
//! let config = DriverConfig::new("/dev/ttyUSB0");
//! let mut driver = Driver::open(&config)?;
//!
//! driver.safe()?;
//! driver.drive(200, 500)?;
//!
//! if let Some(battery) = driver.battery()? {
//!     println!("{} mV", battery.voltage_mv);
//! }
//! driver.close()?;
//! ```

pub mod catalog;
pub mod config;
pub mod heading;
pub mod protocol;
pub mod sensors;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{sensors, OpCode, SensorGroup, SensorPacket};
    pub use crate::config::DriverConfig;
    pub use crate::heading::{classify, Direction};
    pub use crate::protocol::{
        Driver, Error, LedState, MotorState, ReadPolicy, Result, SerialTransport, Transport,
        TransportError, ValidationError,
    };
    pub use crate::sensors::{BatteryStatus, InfoStatus, OiMode, SensorValue};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
