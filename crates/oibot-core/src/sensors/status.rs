//! Composite status records
//!
//! Battery and info status are built from fixed request lists; the field
//! order of each record matches the order of its list.

use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};

use super::decode::split_list;
use crate::catalog::sensors::{
    BATTERY_CAPACITY, BATTERY_CHARGE, CHARGER_AVAILABLE, CHARGING_STATE, CURRENT, OI_MODE,
    VOLTAGE,
};
use crate::catalog::SensorPacket;
use crate::protocol::DecodeError;

/// Open Interface operating mode, ordered by authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OiMode {
    /// OI not started
    Off = 0,
    /// Sensors readable, actuators not
    Passive = 1,
    /// Full control with cliff/wheel-drop safety
    Safe = 2,
    /// Full control, no safety features
    Full = 3,
}

impl TryFrom<u8> for OiMode {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(OiMode::Off),
            1 => Ok(OiMode::Passive),
            2 => Ok(OiMode::Safe),
            3 => Ok(OiMode::Full),
            other => Err(DecodeError::UnknownMode(other)),
        }
    }
}

/// Charging state reported by packet 21
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingState {
    /// Not charging
    NotCharging,
    /// Reconditioning charge
    Reconditioning,
    /// Full charge in progress
    Full,
    /// Trickle charge
    Trickle,
    /// Waiting to charge
    Waiting,
    /// Charging fault
    Fault,
    /// Byte outside the documented states
    Unknown(u8),
}

impl From<u8> for ChargingState {
    fn from(byte: u8) -> Self {
        match byte {
            0 => ChargingState::NotCharging,
            1 => ChargingState::Reconditioning,
            2 => ChargingState::Full,
            3 => ChargingState::Trickle,
            4 => ChargingState::Waiting,
            5 => ChargingState::Fault,
            other => ChargingState::Unknown(other),
        }
    }
}

impl From<ChargingState> for u8 {
    fn from(state: ChargingState) -> Self {
        match state {
            ChargingState::NotCharging => 0,
            ChargingState::Reconditioning => 1,
            ChargingState::Full => 2,
            ChargingState::Trickle => 3,
            ChargingState::Waiting => 4,
            ChargingState::Fault => 5,
            ChargingState::Unknown(b) => b,
        }
    }
}

/// Request list behind [`BatteryStatus`]
pub const BATTERY_PACKETS: [SensorPacket; 6] = [
    CHARGING_STATE,
    VOLTAGE,
    CURRENT,
    BATTERY_CHARGE,
    BATTERY_CAPACITY,
    CHARGER_AVAILABLE,
];

/// Request list behind [`InfoStatus`]: mode followed by the battery list
pub const INFO_PACKETS: [SensorPacket; 7] = [
    OI_MODE,
    CHARGING_STATE,
    VOLTAGE,
    CURRENT,
    BATTERY_CHARGE,
    BATTERY_CAPACITY,
    CHARGER_AVAILABLE,
];

/// Battery and charger telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Charger state
    pub charging_state: ChargingState,
    /// Battery voltage (mV)
    pub voltage_mv: u16,
    /// Battery current (mA); negative while discharging
    pub current_ma: i16,
    /// Remaining charge (mAh)
    pub charge_mah: u16,
    /// Estimated capacity (mAh)
    pub capacity_mah: u16,
    /// Bit 0 internal charger, bit 1 home base
    pub charger_available: u8,
}

impl BatteryStatus {
    /// Decode the response to a [`BATTERY_PACKETS`] query list
    pub fn from_response(bytes: &[u8]) -> Result<Self, DecodeError> {
        let slots = split_list(&BATTERY_PACKETS, bytes)?;
        Ok(Self::from_slots(&slots))
    }

    // Caller guarantees six slots sized per BATTERY_PACKETS
    fn from_slots(slots: &[&[u8]]) -> Self {
        Self {
            charging_state: ChargingState::from(slots[0][0]),
            voltage_mv: BigEndian::read_u16(slots[1]),
            current_ma: BigEndian::read_i16(slots[2]),
            charge_mah: BigEndian::read_u16(slots[3]),
            capacity_mah: BigEndian::read_u16(slots[4]),
            charger_available: slots[5][0],
        }
    }

    /// Remaining charge as a percentage of capacity
    pub fn percent(&self) -> Option<f32> {
        if self.capacity_mah == 0 {
            return None;
        }
        Some(self.charge_mah as f32 * 100.0 / self.capacity_mah as f32)
    }

    /// Positive current means the battery is charging
    pub fn is_charging(&self) -> bool {
        self.current_ma > 0
    }
}

/// Mode plus battery, from a single query list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoStatus {
    /// OI mode at the time of the query
    pub mode: OiMode,
    /// Battery telemetry
    pub battery: BatteryStatus,
}

impl InfoStatus {
    /// Decode the response to an [`INFO_PACKETS`] query list
    pub fn from_response(bytes: &[u8]) -> Result<Self, DecodeError> {
        let slots = split_list(&INFO_PACKETS, bytes)?;
        Ok(Self {
            mode: OiMode::try_from(slots[0][0])?,
            battery: BatteryStatus::from_slots(&slots[1..]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATTERY_BYTES: [u8; 10] = [2, 0x2B, 0x98, 0x00, 0x32, 0x01, 0x2C, 0x01, 0x90, 3];

    #[test]
    fn test_info_list_extends_battery_list() {
        assert_eq!(INFO_PACKETS[0], OI_MODE);
        assert_eq!(&INFO_PACKETS[1..], &BATTERY_PACKETS[..]);
    }

    #[test]
    fn test_battery_from_response() {
        let status = BatteryStatus::from_response(&BATTERY_BYTES).expect("10 bytes");
        assert_eq!(status.charging_state, ChargingState::Full);
        assert_eq!(status.voltage_mv, 11160);
        assert_eq!(status.current_ma, 50);
        assert_eq!(status.charge_mah, 300);
        assert_eq!(status.capacity_mah, 400);
        assert_eq!(status.charger_available, 3);
        assert_eq!(status.percent(), Some(75.0));
        assert!(status.is_charging());
    }

    #[test]
    fn test_info_from_response() {
        let mut bytes = vec![2];
        bytes.extend_from_slice(&BATTERY_BYTES);
        let info = InfoStatus::from_response(&bytes).expect("11 bytes");
        assert_eq!(info.mode, OiMode::Safe);
        assert_eq!(info.battery.voltage_mv, 11160);
    }

    #[test]
    fn test_info_unknown_mode() {
        let mut bytes = vec![9];
        bytes.extend_from_slice(&BATTERY_BYTES);
        assert_eq!(
            InfoStatus::from_response(&bytes),
            Err(DecodeError::UnknownMode(9))
        );
    }

    #[test]
    fn test_mode_ordering() {
        assert!(OiMode::Off < OiMode::Passive);
        assert!(OiMode::Safe < OiMode::Full);
    }

    #[test]
    fn test_charging_state_roundtrip() {
        for b in 0..=7u8 {
            assert_eq!(u8::from(ChargingState::from(b)), b);
        }
        assert_eq!(ChargingState::from(6), ChargingState::Unknown(6));
    }
}
