//! Protocol errors

use thiserror::Error;

/// Which wheel an out-of-range velocity or PWM value was given for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    /// Right drive wheel
    Right,
    /// Left drive wheel
    Left,
}

impl std::fmt::Display for Wheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Wheel::Right => f.write_str("right"),
            Wheel::Left => f.write_str("left"),
        }
    }
}

/// Command arguments rejected before any byte is transmitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid drive velocity: {0} mm/s")]
    DriveVelocity(i16),

    #[error("invalid drive radius: {0} mm")]
    DriveRadius(i16),

    #[error("invalid {wheel} wheel velocity: {value} mm/s")]
    WheelVelocity { wheel: Wheel, value: i16 },

    #[error("invalid {wheel} wheel PWM: {value}")]
    WheelPwm { wheel: Wheel, value: i16 },

    #[error("invalid {motor} motor PWM: {value}")]
    MotorPwm { motor: &'static str, value: i8 },

    #[error("unsupported baud rate: {0}")]
    UnsupportedBaudRate(u32),

    #[error("invalid song number: {0}")]
    SongNumber(u8),

    #[error("invalid song length: {0} notes")]
    SongLength(usize),

    #[error("invalid song note: {0}")]
    SongNote(u8),

    #[error("invalid digit LED character: {0:#04x}")]
    DigitChar(u8),

    #[error("unknown sensor packet or group: {0}")]
    UnknownPacket(u8),

    #[error("descriptor for id {0} does not match the catalog")]
    CatalogMismatch(u8),

    #[error("query list is empty")]
    EmptyQueryList,

    #[error("query list too long: {0} packets")]
    QueryListTooLong(usize),
}

/// Byte-level failures of the serial link
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to open serial port {port}: {reason}")]
    Open { port: String, reason: String },

    #[error("Serial port error: {0}")]
    Serial(String),

    #[error("short write: expected {expected} bytes, wrote {written}")]
    ShortWrite { expected: usize, written: usize },

    #[error("read timed out")]
    Timeout,

    #[error("transport is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw telemetry that cannot be turned into a typed value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unknown OI mode: {0}")]
    UnknownMode(u8),
}

/// Errors returned by driver operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors raised before anything reached the wire
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result alias used throughout the driver
pub type Result<T> = std::result::Result<T, Error>;
