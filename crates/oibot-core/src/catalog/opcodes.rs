//! Protocol opcodes
//!
//! Defines the commands supported by the Open Interface.

use serde::{Deserialize, Serialize};

/// Single-byte Open Interface command identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OpCode {
    /// Soft reset, as if the battery were removed and reinserted
    Reset = 7,
    /// Start the OI; always the first command sent. Enters Passive mode
    Start = 128,
    /// Change the device baud rate
    Baud = 129,
    /// Legacy alias of Safe on older firmware
    Control = 130,
    /// Enter Safe mode
    Safe = 131,
    /// Enter Full mode
    Full = 132,
    /// Power down; the OI drops to Passive mode
    Power = 133,
    /// Spot cleaning cycle
    Spot = 134,
    /// Default cleaning cycle
    Clean = 135,
    /// Max cleaning cycle
    MaxClean = 136,
    /// Velocity + turn radius
    Drive = 137,
    /// Cleaning motors on/off
    Motors = 138,
    /// LEDs and power button color
    Leds = 139,
    /// Define a song
    Song = 140,
    /// Play a stored song
    Play = 141,
    /// Request a single sensor packet or group
    Query = 142,
    /// Return to the dock
    ForceSeekingDock = 143,
    /// Cleaning motor duty cycles
    PwmMotors = 144,
    /// Independent wheel velocities
    DriveWheels = 145,
    /// Independent wheel duty cycles
    DrivePwm = 146,
    /// Start a sensor stream
    Stream = 148,
    /// Request a list of sensor packets
    QueryList = 149,
    /// Pause or resume a running stream
    PauseResumeStream = 150,
    /// Scheduling LEDs
    SchedulingLeds = 162,
    /// Raw seven-segment digit LEDs
    DigitLedsRaw = 163,
    /// ASCII seven-segment digit LEDs
    DigitLedsAscii = 164,
    /// Simulated button presses
    Buttons = 165,
    /// Cleaning schedule
    Schedule = 167,
    /// Device clock
    SetDayTime = 168,
    /// Stop the OI; halts streaming and motion
    Stop = 173,
}

impl OpCode {
    /// Every opcode the protocol defines
    pub const ALL: [OpCode; 30] = [
        OpCode::Reset,
        OpCode::Start,
        OpCode::Baud,
        OpCode::Control,
        OpCode::Safe,
        OpCode::Full,
        OpCode::Power,
        OpCode::Spot,
        OpCode::Clean,
        OpCode::MaxClean,
        OpCode::Drive,
        OpCode::Motors,
        OpCode::Leds,
        OpCode::Song,
        OpCode::Play,
        OpCode::Query,
        OpCode::ForceSeekingDock,
        OpCode::PwmMotors,
        OpCode::DriveWheels,
        OpCode::DrivePwm,
        OpCode::Stream,
        OpCode::QueryList,
        OpCode::PauseResumeStream,
        OpCode::SchedulingLeds,
        OpCode::DigitLedsRaw,
        OpCode::DigitLedsAscii,
        OpCode::Buttons,
        OpCode::Schedule,
        OpCode::SetDayTime,
        OpCode::Stop,
    ];

    /// Get the wire byte
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Fixed payload length in bytes, or `None` when the payload carries its own count
    pub fn payload_len(self) -> Option<usize> {
        match self {
            OpCode::Reset
            | OpCode::Start
            | OpCode::Control
            | OpCode::Safe
            | OpCode::Full
            | OpCode::Power
            | OpCode::Spot
            | OpCode::Clean
            | OpCode::MaxClean
            | OpCode::ForceSeekingDock
            | OpCode::Stop => Some(0),
            OpCode::Baud
            | OpCode::Motors
            | OpCode::Play
            | OpCode::Query
            | OpCode::PauseResumeStream
            | OpCode::Buttons => Some(1),
            OpCode::SchedulingLeds => Some(2),
            OpCode::Leds | OpCode::PwmMotors | OpCode::SetDayTime => Some(3),
            OpCode::Drive
            | OpCode::DriveWheels
            | OpCode::DrivePwm
            | OpCode::DigitLedsRaw
            | OpCode::DigitLedsAscii => Some(4),
            OpCode::Schedule => Some(15),
            OpCode::Song | OpCode::Stream | OpCode::QueryList => None,
        }
    }

    /// Check if the device answers this command with sensor data
    pub fn expects_response(self) -> bool {
        matches!(self, OpCode::Query | OpCode::QueryList)
    }
}

impl From<OpCode> for u8 {
    fn from(code: OpCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        OpCode::ALL
            .iter()
            .copied()
            .find(|code| code.byte() == byte)
            .ok_or(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_bytes() {
        assert_eq!(OpCode::Start.byte(), 128);
        assert_eq!(OpCode::Drive.byte(), 137);
        assert_eq!(OpCode::DriveWheels.byte(), 145);
        assert_eq!(OpCode::QueryList.byte(), 149);
        assert_eq!(OpCode::Stop.byte(), 173);
    }

    #[test]
    fn test_opcode_from_byte() {
        for code in OpCode::ALL {
            assert_eq!(OpCode::try_from(code.byte()), Ok(code));
        }
        assert_eq!(OpCode::try_from(147), Err(147));
        assert_eq!(OpCode::try_from(0), Err(0));
    }

    #[test]
    fn test_payload_shapes() {
        assert_eq!(OpCode::Start.payload_len(), Some(0));
        assert_eq!(OpCode::Baud.payload_len(), Some(1));
        assert_eq!(OpCode::Drive.payload_len(), Some(4));
        assert_eq!(OpCode::QueryList.payload_len(), None);
    }

    #[test]
    fn test_opcode_response() {
        assert!(OpCode::Query.expects_response());
        assert!(!OpCode::Drive.expects_response());
    }
}
