//! Sensor packet table
//!
//! Every telemetry field the OI can report, keyed by packet id (7-58).
//! The table is contiguous, so lookup is an index rather than a search.

use serde::Serialize;

/// Width of a sensor packet on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PacketSize {
    /// Single byte
    One = 1,
    /// Big-endian 16-bit word
    Two = 2,
}

impl PacketSize {
    /// Size in bytes
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

/// Signedness of a sensor packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    /// Unsigned integer
    Unsigned,
    /// Two's complement integer
    Signed,
}

/// Physical unit reported by a sensor packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    /// Flags, states and raw signal strengths
    None,
    /// Millimeters
    Millimeters,
    /// Millimeters per second
    MillimetersPerSecond,
    /// Degrees
    Degrees,
    /// Millivolts
    Millivolts,
    /// Milliamps
    Milliamps,
    /// Degrees Celsius
    Celsius,
    /// Milliamp hours
    MilliampHours,
    /// Encoder counts
    Counts,
}

impl Unit {
    /// Short display suffix
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Millimeters => "mm",
            Unit::MillimetersPerSecond => "mm/s",
            Unit::Degrees => "deg",
            Unit::Millivolts => "mV",
            Unit::Milliamps => "mA",
            Unit::Celsius => "C",
            Unit::MilliampHours => "mAh",
            Unit::Counts => "counts",
        }
    }
}

/// A named telemetry field with fixed width and value semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorPacket {
    /// Packet id sent with Query/QueryList
    pub id: u8,
    /// Human-readable name
    pub name: &'static str,
    /// Width on the wire
    pub size: PacketSize,
    /// Signedness
    pub kind: ValueKind,
    /// Physical unit
    pub unit: Unit,
}

impl SensorPacket {
    const fn new(id: u8, name: &'static str, size: PacketSize, kind: ValueKind, unit: Unit) -> Self {
        Self {
            id,
            name,
            size,
            kind,
            unit,
        }
    }

    /// Size in bytes
    pub const fn bytes(&self) -> usize {
        self.size.bytes()
    }
}

use PacketSize::{One, Two};
use ValueKind::{Signed, Unsigned};

/// Packet 7: bumps and wheel drops
pub const BUMPS_WHEEL_DROPS: SensorPacket = SensorPacket::new(7, "bumps_wheel_drops", One, Unsigned, Unit::None);
/// Packet 8: wall
pub const WALL: SensorPacket = SensorPacket::new(8, "wall", One, Unsigned, Unit::None);
/// Packet 9: cliff left
pub const CLIFF_LEFT: SensorPacket = SensorPacket::new(9, "cliff_left", One, Unsigned, Unit::None);
/// Packet 10: cliff front left
pub const CLIFF_FRONT_LEFT: SensorPacket = SensorPacket::new(10, "cliff_front_left", One, Unsigned, Unit::None);
/// Packet 11: cliff front right
pub const CLIFF_FRONT_RIGHT: SensorPacket = SensorPacket::new(11, "cliff_front_right", One, Unsigned, Unit::None);
/// Packet 12: cliff right
pub const CLIFF_RIGHT: SensorPacket = SensorPacket::new(12, "cliff_right", One, Unsigned, Unit::None);
/// Packet 13: virtual wall
pub const VIRTUAL_WALL: SensorPacket = SensorPacket::new(13, "virtual_wall", One, Unsigned, Unit::None);
/// Packet 14: wheel overcurrents
pub const WHEEL_OVERCURRENTS: SensorPacket = SensorPacket::new(14, "wheel_overcurrents", One, Unsigned, Unit::None);
/// Packet 15: dirt detect
pub const DIRT_DETECT: SensorPacket = SensorPacket::new(15, "dirt_detect", One, Unsigned, Unit::None);
/// Packet 16: unused 16
pub const UNUSED_16: SensorPacket = SensorPacket::new(16, "unused_16", One, Unsigned, Unit::None);
/// Packet 17: infrared omni
pub const IR_OMNI: SensorPacket = SensorPacket::new(17, "infrared_omni", One, Unsigned, Unit::None);
/// Packet 18: buttons
pub const BUTTONS: SensorPacket = SensorPacket::new(18, "buttons", One, Unsigned, Unit::None);
/// Packet 19: distance
pub const DISTANCE: SensorPacket = SensorPacket::new(19, "distance", Two, Signed, Unit::Millimeters);
/// Packet 20: angle
pub const ANGLE: SensorPacket = SensorPacket::new(20, "angle", Two, Signed, Unit::Degrees);
/// Packet 21: charging state
pub const CHARGING_STATE: SensorPacket = SensorPacket::new(21, "charging_state", One, Unsigned, Unit::None);
/// Packet 22: voltage
pub const VOLTAGE: SensorPacket = SensorPacket::new(22, "voltage", Two, Unsigned, Unit::Millivolts);
/// Packet 23: current
pub const CURRENT: SensorPacket = SensorPacket::new(23, "current", Two, Signed, Unit::Milliamps);
/// Packet 24: temperature
pub const TEMPERATURE: SensorPacket = SensorPacket::new(24, "temperature", One, Signed, Unit::Celsius);
/// Packet 25: battery charge
pub const BATTERY_CHARGE: SensorPacket = SensorPacket::new(25, "battery_charge", Two, Unsigned, Unit::MilliampHours);
/// Packet 26: battery capacity
pub const BATTERY_CAPACITY: SensorPacket = SensorPacket::new(26, "battery_capacity", Two, Unsigned, Unit::MilliampHours);
/// Packet 27: wall signal
pub const WALL_SIGNAL: SensorPacket = SensorPacket::new(27, "wall_signal", Two, Unsigned, Unit::None);
/// Packet 28: cliff left signal
pub const CLIFF_LEFT_SIGNAL: SensorPacket = SensorPacket::new(28, "cliff_left_signal", Two, Unsigned, Unit::None);
/// Packet 29: cliff front left signal
pub const CLIFF_FRONT_LEFT_SIGNAL: SensorPacket = SensorPacket::new(29, "cliff_front_left_signal", Two, Unsigned, Unit::None);
/// Packet 30: cliff front right signal
pub const CLIFF_FRONT_RIGHT_SIGNAL: SensorPacket = SensorPacket::new(30, "cliff_front_right_signal", Two, Unsigned, Unit::None);
/// Packet 31: cliff right signal
pub const CLIFF_RIGHT_SIGNAL: SensorPacket = SensorPacket::new(31, "cliff_right_signal", Two, Unsigned, Unit::None);
/// Packet 32: unused 32
pub const UNUSED_32: SensorPacket = SensorPacket::new(32, "unused_32", One, Unsigned, Unit::None);
/// Packet 33: unused 33
pub const UNUSED_33: SensorPacket = SensorPacket::new(33, "unused_33", Two, Unsigned, Unit::None);
/// Packet 34: charging sources available
pub const CHARGER_AVAILABLE: SensorPacket = SensorPacket::new(34, "charging_sources_available", One, Unsigned, Unit::None);
/// Packet 35: oi mode
pub const OI_MODE: SensorPacket = SensorPacket::new(35, "oi_mode", One, Unsigned, Unit::None);
/// Packet 36: song number
pub const SONG_NUMBER: SensorPacket = SensorPacket::new(36, "song_number", One, Unsigned, Unit::None);
/// Packet 37: song playing
pub const SONG_PLAYING: SensorPacket = SensorPacket::new(37, "song_playing", One, Unsigned, Unit::None);
/// Packet 38: number of stream packets
pub const STREAM_PACKETS: SensorPacket = SensorPacket::new(38, "number_of_stream_packets", One, Unsigned, Unit::None);
/// Packet 39: requested velocity
pub const REQUESTED_VELOCITY: SensorPacket = SensorPacket::new(39, "requested_velocity", Two, Signed, Unit::MillimetersPerSecond);
/// Packet 40: requested radius
pub const REQUESTED_RADIUS: SensorPacket = SensorPacket::new(40, "requested_radius", Two, Signed, Unit::Millimeters);
/// Packet 41: requested right velocity
pub const REQUESTED_RIGHT_VELOCITY: SensorPacket = SensorPacket::new(41, "requested_right_velocity", Two, Signed, Unit::MillimetersPerSecond);
/// Packet 42: requested left velocity
pub const REQUESTED_LEFT_VELOCITY: SensorPacket = SensorPacket::new(42, "requested_left_velocity", Two, Signed, Unit::MillimetersPerSecond);
/// Packet 43: left encoder counts
pub const LEFT_ENCODER_COUNTS: SensorPacket = SensorPacket::new(43, "left_encoder_counts", Two, Unsigned, Unit::Counts);
/// Packet 44: right encoder counts
pub const RIGHT_ENCODER_COUNTS: SensorPacket = SensorPacket::new(44, "right_encoder_counts", Two, Unsigned, Unit::Counts);
/// Packet 45: light bumper
pub const LIGHT_BUMPER: SensorPacket = SensorPacket::new(45, "light_bumper", One, Unsigned, Unit::None);
/// Packet 46: light bump left signal
pub const LIGHT_BUMP_LEFT: SensorPacket = SensorPacket::new(46, "light_bump_left_signal", Two, Unsigned, Unit::None);
/// Packet 47: light bump front left signal
pub const LIGHT_BUMP_FRONT_LEFT: SensorPacket = SensorPacket::new(47, "light_bump_front_left_signal", Two, Unsigned, Unit::None);
/// Packet 48: light bump center left signal
pub const LIGHT_BUMP_CENTER_LEFT: SensorPacket = SensorPacket::new(48, "light_bump_center_left_signal", Two, Unsigned, Unit::None);
/// Packet 49: light bump center right signal
pub const LIGHT_BUMP_CENTER_RIGHT: SensorPacket = SensorPacket::new(49, "light_bump_center_right_signal", Two, Unsigned, Unit::None);
/// Packet 50: light bump front right signal
pub const LIGHT_BUMP_FRONT_RIGHT: SensorPacket = SensorPacket::new(50, "light_bump_front_right_signal", Two, Unsigned, Unit::None);
/// Packet 51: light bump right signal
pub const LIGHT_BUMP_RIGHT: SensorPacket = SensorPacket::new(51, "light_bump_right_signal", Two, Unsigned, Unit::None);
/// Packet 52: infrared left
pub const IR_LEFT: SensorPacket = SensorPacket::new(52, "infrared_left", One, Unsigned, Unit::None);
/// Packet 53: infrared right
pub const IR_RIGHT: SensorPacket = SensorPacket::new(53, "infrared_right", One, Unsigned, Unit::None);
/// Packet 54: left motor current
pub const LEFT_MOTOR_CURRENT: SensorPacket = SensorPacket::new(54, "left_motor_current", Two, Signed, Unit::Milliamps);
/// Packet 55: right motor current
pub const RIGHT_MOTOR_CURRENT: SensorPacket = SensorPacket::new(55, "right_motor_current", Two, Signed, Unit::Milliamps);
/// Packet 56: main brush motor current
pub const MAIN_BRUSH_CURRENT: SensorPacket = SensorPacket::new(56, "main_brush_motor_current", Two, Signed, Unit::Milliamps);
/// Packet 57: side brush motor current
pub const SIDE_BRUSH_CURRENT: SensorPacket = SensorPacket::new(57, "side_brush_motor_current", Two, Signed, Unit::Milliamps);
/// Packet 58: stasis
pub const STASIS: SensorPacket = SensorPacket::new(58, "stasis", One, Unsigned, Unit::None);

/// Lowest packet id in the table
pub const FIRST_ID: u8 = 7;

/// Highest packet id in the table
pub const LAST_ID: u8 = 58;

/// All sensor packets, ordered by id
pub static ALL: [SensorPacket; 52] = [
    BUMPS_WHEEL_DROPS,
    WALL,
    CLIFF_LEFT,
    CLIFF_FRONT_LEFT,
    CLIFF_FRONT_RIGHT,
    CLIFF_RIGHT,
    VIRTUAL_WALL,
    WHEEL_OVERCURRENTS,
    DIRT_DETECT,
    UNUSED_16,
    IR_OMNI,
    BUTTONS,
    DISTANCE,
    ANGLE,
    CHARGING_STATE,
    VOLTAGE,
    CURRENT,
    TEMPERATURE,
    BATTERY_CHARGE,
    BATTERY_CAPACITY,
    WALL_SIGNAL,
    CLIFF_LEFT_SIGNAL,
    CLIFF_FRONT_LEFT_SIGNAL,
    CLIFF_FRONT_RIGHT_SIGNAL,
    CLIFF_RIGHT_SIGNAL,
    UNUSED_32,
    UNUSED_33,
    CHARGER_AVAILABLE,
    OI_MODE,
    SONG_NUMBER,
    SONG_PLAYING,
    STREAM_PACKETS,
    REQUESTED_VELOCITY,
    REQUESTED_RADIUS,
    REQUESTED_RIGHT_VELOCITY,
    REQUESTED_LEFT_VELOCITY,
    LEFT_ENCODER_COUNTS,
    RIGHT_ENCODER_COUNTS,
    LIGHT_BUMPER,
    LIGHT_BUMP_LEFT,
    LIGHT_BUMP_FRONT_LEFT,
    LIGHT_BUMP_CENTER_LEFT,
    LIGHT_BUMP_CENTER_RIGHT,
    LIGHT_BUMP_FRONT_RIGHT,
    LIGHT_BUMP_RIGHT,
    IR_LEFT,
    IR_RIGHT,
    LEFT_MOTOR_CURRENT,
    RIGHT_MOTOR_CURRENT,
    MAIN_BRUSH_CURRENT,
    SIDE_BRUSH_CURRENT,
    STASIS,
];

/// Look up a sensor packet by id
pub fn packet(id: u8) -> Option<&'static SensorPacket> {
    ALL.get(id.checked_sub(FIRST_ID)? as usize)
}

/// Contiguous run of packets `first..=last`, used to describe sensor groups
pub(crate) fn span(first: u8, last: u8) -> &'static [SensorPacket] {
    &ALL[(first - FIRST_ID) as usize..=(last - FIRST_ID) as usize]
}
