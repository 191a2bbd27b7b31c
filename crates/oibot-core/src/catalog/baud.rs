//! Baud rate codes
//!
//! The Baud command carries a one-byte code rather than the rate itself.

use crate::protocol::ValidationError;

/// Supported bit rates, indexed by their code
pub const SUPPORTED_RATES: [u32; 12] = [
    300, 600, 1200, 2400, 4800, 9600, 14400, 19200, 28800, 38400, 57600, 115200,
];

/// Code for a supported baud rate
pub fn code_for_rate(rate: u32) -> Result<u8, ValidationError> {
    SUPPORTED_RATES
        .iter()
        .position(|&r| r == rate)
        .map(|code| code as u8)
        .ok_or(ValidationError::UnsupportedBaudRate(rate))
}

/// Baud rate for a code, if the code is defined
pub fn rate_for_code(code: u8) -> Option<u32> {
    SUPPORTED_RATES.get(code as usize).copied()
}

/// Check if the OI can run at this rate
pub fn is_supported(rate: u32) -> bool {
    SUPPORTED_RATES.contains(&rate)
}
