//! Open Interface Catalog
//!
//! Static tables describing the protocol: opcodes, sensor packets,
//! sensor groups and baud rate codes. Everything here is compile-time
//! data and is never mutated.

pub mod baud;
pub mod groups;
pub mod opcodes;
pub mod sensors;

pub use groups::SensorGroup;
pub use opcodes::OpCode;
pub use sensors::{PacketSize, SensorPacket, Unit, ValueKind};

/// Number of response bytes for a packet or group id, if the id is known
pub fn response_size(id: u8) -> Option<usize> {
    sensors::packet(id)
        .map(SensorPacket::bytes)
        .or_else(|| groups::group(id).map(|g| g.size))
}
