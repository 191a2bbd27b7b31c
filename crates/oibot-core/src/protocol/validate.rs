//! Argument validation
//!
//! Range checks run before a frame is built, so a rejected call never
//! puts a byte on the wire.

use super::error::{ValidationError, Wheel};
use crate::catalog::{self, baud, groups, sensors, SensorGroup, SensorPacket};

/// Fastest drive velocity in either direction (mm/s)
pub const MAX_DRIVE_VELOCITY_MMPS: i16 = 500;

/// Largest turn radius in either direction (mm)
pub const MAX_DRIVE_RADIUS_MM: i16 = 2000;

/// Reserved radius meaning "drive straight"
pub const DRIVE_STRAIGHT_RADIUS: i16 = i16::MAX;

/// Largest wheel PWM magnitude
pub const MAX_WHEEL_PWM: i16 = 255;

/// Largest brush PWM magnitude
pub const MAX_BRUSH_PWM: i8 = 127;

/// Highest song slot
pub const MAX_SONG_NUMBER: u8 = 4;

/// Most notes a song slot can hold
pub const MAX_SONG_LENGTH: usize = 16;

/// Playable MIDI note range; anything else is a rest
pub const SONG_NOTE_RANGE: std::ops::RangeInclusive<u8> = 31..=127;

fn velocity_in_range(v: i16) -> bool {
    (-MAX_DRIVE_VELOCITY_MMPS..=MAX_DRIVE_VELOCITY_MMPS).contains(&v)
}

/// Validate Drive arguments
pub fn drive(velocity: i16, radius: i16) -> Result<(), ValidationError> {
    if !velocity_in_range(velocity) {
        return Err(ValidationError::DriveVelocity(velocity));
    }
    if radius != DRIVE_STRAIGHT_RADIUS
        && !(-MAX_DRIVE_RADIUS_MM..=MAX_DRIVE_RADIUS_MM).contains(&radius)
    {
        return Err(ValidationError::DriveRadius(radius));
    }
    Ok(())
}

/// Validate DriveWheels arguments
pub fn drive_wheels(right: i16, left: i16) -> Result<(), ValidationError> {
    if !velocity_in_range(right) {
        return Err(ValidationError::WheelVelocity {
            wheel: Wheel::Right,
            value: right,
        });
    }
    if !velocity_in_range(left) {
        return Err(ValidationError::WheelVelocity {
            wheel: Wheel::Left,
            value: left,
        });
    }
    Ok(())
}

/// Validate DrivePwm arguments
pub fn drive_pwm(right: i16, left: i16) -> Result<(), ValidationError> {
    for (wheel, value) in [(Wheel::Right, right), (Wheel::Left, left)] {
        if !(-MAX_WHEEL_PWM..=MAX_WHEEL_PWM).contains(&value) {
            return Err(ValidationError::WheelPwm { wheel, value });
        }
    }
    Ok(())
}

/// Validate PwmMotors arguments
pub fn pwm_motors(main_brush: i8, side_brush: i8, vacuum: i8) -> Result<(), ValidationError> {
    // i8 already caps at 127; only -128 is out of range for the brushes
    for (motor, value) in [("main brush", main_brush), ("side brush", side_brush)] {
        if value < -MAX_BRUSH_PWM {
            return Err(ValidationError::MotorPwm { motor, value });
        }
    }
    if vacuum < 0 {
        return Err(ValidationError::MotorPwm {
            motor: "vacuum",
            value: vacuum,
        });
    }
    Ok(())
}

/// Validate a Baud change, returning the code to send
pub fn baud(rate: u32) -> Result<u8, ValidationError> {
    baud::code_for_rate(rate)
}

/// Validate a song slot number
pub fn song_number(number: u8) -> Result<(), ValidationError> {
    if number > MAX_SONG_NUMBER {
        return Err(ValidationError::SongNumber(number));
    }
    Ok(())
}

/// Validate a Song definition of `(note, duration)` pairs
pub fn song(number: u8, notes: &[(u8, u8)]) -> Result<(), ValidationError> {
    song_number(number)?;
    if notes.is_empty() || notes.len() > MAX_SONG_LENGTH {
        return Err(ValidationError::SongLength(notes.len()));
    }
    if let Some(&(note, _)) = notes.iter().find(|(n, _)| !SONG_NOTE_RANGE.contains(n)) {
        return Err(ValidationError::SongNote(note));
    }
    Ok(())
}

/// Validate printable ASCII for the digit LEDs
pub fn digit_leds_ascii(chars: &[u8; 4]) -> Result<(), ValidationError> {
    match chars.iter().find(|c| !(32..=126).contains(*c)) {
        Some(&c) => Err(ValidationError::DigitChar(c)),
        None => Ok(()),
    }
}

/// Validate a packet or group id for Query
pub fn query(id: u8) -> Result<usize, ValidationError> {
    catalog::response_size(id).ok_or(ValidationError::UnknownPacket(id))
}

/// Check a packet descriptor against the catalog entry for its id
pub fn packet(packet: &SensorPacket) -> Result<(), ValidationError> {
    match sensors::packet(packet.id) {
        Some(known) if known == packet => Ok(()),
        Some(_) => Err(ValidationError::CatalogMismatch(packet.id)),
        None => Err(ValidationError::UnknownPacket(packet.id)),
    }
}

/// Check a group descriptor against the catalog entry for its id
pub fn group(group: &SensorGroup) -> Result<(), ValidationError> {
    match groups::group(group.id) {
        Some(known) if known == group => Ok(()),
        Some(_) => Err(ValidationError::CatalogMismatch(group.id)),
        None => Err(ValidationError::UnknownPacket(group.id)),
    }
}

/// Validate a QueryList request, returning the expected response size
pub fn query_list(ids: &[u8]) -> Result<usize, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::EmptyQueryList);
    }
    if ids.len() > u8::MAX as usize {
        return Err(ValidationError::QueryListTooLong(ids.len()));
    }
    ids.iter().map(|&id| query(id)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_limits() {
        assert!(drive(500, 2000).is_ok());
        assert!(drive(-500, -2000).is_ok());
        assert_eq!(drive(501, 0), Err(ValidationError::DriveVelocity(501)));
        assert_eq!(drive(0, -2001), Err(ValidationError::DriveRadius(-2001)));
    }

    #[test]
    fn test_drive_straight_bypasses_radius_check() {
        assert!(drive(200, DRIVE_STRAIGHT_RADIUS).is_ok());
        // The sentinel does not excuse a bad velocity
        assert!(drive(-501, DRIVE_STRAIGHT_RADIUS).is_err());
        // i16::MIN is not the sentinel
        assert!(drive(200, i16::MIN).is_err());
    }

    #[test]
    fn test_drive_wheels_reports_wheel() {
        assert_eq!(
            drive_wheels(0, -600),
            Err(ValidationError::WheelVelocity {
                wheel: Wheel::Left,
                value: -600
            })
        );
        assert_eq!(
            drive_wheels(700, -600),
            Err(ValidationError::WheelVelocity {
                wheel: Wheel::Right,
                value: 700
            })
        );
    }

    #[test]
    fn test_pwm_limits() {
        assert!(drive_pwm(255, -255).is_ok());
        assert!(drive_pwm(256, 0).is_err());
        assert!(pwm_motors(127, -127, 127).is_ok());
        assert!(pwm_motors(-128, 0, 0).is_err());
        assert!(pwm_motors(0, 0, -1).is_err());
    }

    #[test]
    fn test_song_rules() {
        assert!(song(0, &[(60, 32)]).is_ok());
        assert_eq!(song(5, &[(60, 32)]), Err(ValidationError::SongNumber(5)));
        assert_eq!(song(1, &[]), Err(ValidationError::SongLength(0)));
        assert_eq!(song(1, &[(60, 8); 17]), Err(ValidationError::SongLength(17)));
        assert_eq!(song(1, &[(60, 8), (30, 8)]), Err(ValidationError::SongNote(30)));
    }

    #[test]
    fn test_query_list_size() {
        assert_eq!(query_list(&[21, 22, 23]), Ok(5));
        assert_eq!(query_list(&[]), Err(ValidationError::EmptyQueryList));
        assert_eq!(query_list(&[21, 99]), Err(ValidationError::UnknownPacket(99)));
        assert_eq!(query_list(&[3, 35]), Ok(11));
    }

    #[test]
    fn test_descriptors_must_match_catalog() {
        use crate::catalog::{groups::GROUP_3, sensors::VOLTAGE, PacketSize};

        assert_eq!(packet(&VOLTAGE), Ok(()));
        let narrowed = SensorPacket {
            size: PacketSize::One,
            ..VOLTAGE
        };
        assert_eq!(packet(&narrowed), Err(ValidationError::CatalogMismatch(22)));
        let group_id = SensorPacket { id: 0, ..narrowed };
        assert_eq!(packet(&group_id), Err(ValidationError::UnknownPacket(0)));

        assert_eq!(group(&GROUP_3), Ok(()));
        let mut short = GROUP_3;
        short.size = 4;
        assert_eq!(group(&short), Err(ValidationError::CatalogMismatch(3)));
    }

    #[test]
    fn test_digit_chars() {
        assert!(digit_leds_ascii(b"ABCD").is_ok());
        assert_eq!(digit_leds_ascii(&[65, 10, 65, 65]), Err(ValidationError::DigitChar(10)));
    }
}
