//! Driver configuration
//!
//! Settings needed to open a driver, loadable from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::catalog::baud;
use crate::protocol::{Error, DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT_MS};

/// How to reach the robot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Serial port name
    pub port_name: String,
    /// Baud rate; must be one the OI supports
    pub baud_rate: u32,
    /// Read timeout in milliseconds. `None` or `0` blocks indefinitely
    pub read_timeout_ms: Option<u64>,
    /// Re-send the Baud command on open so the robot matches `baud_rate`
    pub init_baud: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            port_name: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: Some(DEFAULT_READ_TIMEOUT_MS),
            init_baud: false,
        }
    }
}

impl DriverConfig {
    /// Config for a port with default settings
    pub fn new(port_name: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            ..Self::default()
        }
    }

    /// Parse from a JSON string
    pub fn from_json(content: &str) -> Result<Self, Error> {
        let config: DriverConfig =
            serde_json::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check the settings before any port is touched
    pub fn validate(&self) -> Result<(), Error> {
        if self.port_name.trim().is_empty() {
            return Err(Error::Config("port_name is empty".to_string()));
        }
        baud::code_for_rate(self.baud_rate)?;
        Ok(())
    }

    /// Read timeout as a duration; `None` means block indefinitely
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::new("/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(
            config.read_timeout(),
            Some(Duration::from_millis(DEFAULT_READ_TIMEOUT_MS))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_blocks() {
        let config = DriverConfig {
            read_timeout_ms: Some(0),
            ..DriverConfig::new("/dev/ttyUSB0")
        };
        assert_eq!(config.read_timeout(), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DriverConfig::from_json(r#"{"port_name": "COM3", "baud_rate": 57600}"#)
            .expect("valid config");
        assert_eq!(config.port_name, "COM3");
        assert_eq!(config.baud_rate, 57600);
        assert!(!config.init_baud);
        assert_eq!(config.read_timeout_ms, Some(DEFAULT_READ_TIMEOUT_MS));
    }

    #[test]
    fn test_rejects_bad_baud() {
        let err = DriverConfig::from_json(r#"{"port_name": "COM3", "baud_rate": 250000}"#)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_rejects_empty_port() {
        assert!(matches!(
            DriverConfig::from_json("{}"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = DriverConfig {
            read_timeout_ms: None,
            init_baud: true,
            ..DriverConfig::new("/dev/ttyUSB1")
        };
        let json = config.to_json().unwrap();
        assert_eq!(DriverConfig::from_json(&json).unwrap(), config);
    }
}
