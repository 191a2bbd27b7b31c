//! Actuator bit fields
//!
//! Payload bytes for the Motors and Leds commands.

use serde::{Deserialize, Serialize};

/// Cleaning motor switches for the Motors command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorState {
    /// Side brush on
    pub side_brush: bool,
    /// Vacuum on
    pub vacuum: bool,
    /// Main brush on
    pub main_brush: bool,
    /// Spin the side brush clockwise instead of the default counter-clockwise
    pub side_brush_clockwise: bool,
    /// Spin the main brush outward instead of inward
    pub main_brush_outward: bool,
}

impl MotorState {
    /// All cleaning motors on in their default directions
    pub fn all_on() -> Self {
        Self {
            side_brush: true,
            vacuum: true,
            main_brush: true,
            ..Self::default()
        }
    }

    /// Encode as the Motors payload byte
    pub fn to_byte(&self) -> u8 {
        (self.side_brush as u8)
            | (self.vacuum as u8) << 1
            | (self.main_brush as u8) << 2
            | (self.side_brush_clockwise as u8) << 3
            | (self.main_brush_outward as u8) << 4
    }
}

/// Indicator LEDs and power button color for the Leds command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedState {
    /// Debris indicator
    pub debris: bool,
    /// Spot indicator
    pub spot: bool,
    /// Dock indicator
    pub dock: bool,
    /// Check Robot warning
    pub check_robot: bool,
    /// 0 = green, 255 = red
    pub power_color: u8,
    /// 0 = off, 255 = full
    pub power_intensity: u8,
}

impl LedState {
    /// Encode the indicator bits
    pub fn bits(&self) -> u8 {
        (self.debris as u8)
            | (self.spot as u8) << 1
            | (self.dock as u8) << 2
            | (self.check_robot as u8) << 3
    }

    /// Encode as the three-byte Leds payload
    pub fn to_bytes(&self) -> [u8; 3] {
        [self.bits(), self.power_color, self.power_intensity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_bits() {
        assert_eq!(MotorState::default().to_byte(), 0);
        assert_eq!(MotorState::all_on().to_byte(), 0b0000_0111);
        let reversed = MotorState {
            main_brush: true,
            main_brush_outward: true,
            ..MotorState::default()
        };
        assert_eq!(reversed.to_byte(), 0b0001_0100);
    }

    #[test]
    fn test_led_bits() {
        let leds = LedState {
            check_robot: true,
            debris: true,
            power_color: 128,
            power_intensity: 255,
            ..LedState::default()
        };
        assert_eq!(leds.to_bytes(), [0b1001, 128, 255]);
    }
}
