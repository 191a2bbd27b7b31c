//! Sensor telemetry decoding

pub mod decode;
pub mod status;

pub use decode::{decode_group, decode_list, decode_value, split_list, Reading, SensorValue};
pub use status::{BatteryStatus, ChargingState, InfoStatus, OiMode, BATTERY_PACKETS, INFO_PACKETS};
