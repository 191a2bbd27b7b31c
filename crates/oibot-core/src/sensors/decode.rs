//! Sensor decoding
//!
//! Turns raw response bytes into typed values. Width and signedness come
//! from each packet's catalog entry; there is no global rule. Batched
//! responses carry no tags, so slot N always belongs to request N.

use byteorder::{BigEndian, ByteOrder};
use serde::Serialize;

use crate::catalog::{PacketSize, SensorGroup, SensorPacket, ValueKind};
use crate::protocol::DecodeError;

/// A decoded sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    /// Unsigned byte
    U8(u8),
    /// Signed byte
    I8(i8),
    /// Unsigned 16-bit word
    U16(u16),
    /// Signed 16-bit word
    I16(i16),
}

impl SensorValue {
    /// Widen to `i32` without loss
    pub fn as_i32(&self) -> i32 {
        match *self {
            SensorValue::U8(v) => v as i32,
            SensorValue::I8(v) => v as i32,
            SensorValue::U16(v) => v as i32,
            SensorValue::I16(v) => v as i32,
        }
    }
}

impl std::fmt::Display for SensorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// A value paired with the packet it was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reading {
    /// Catalog entry
    pub packet: SensorPacket,
    /// Decoded value
    pub value: SensorValue,
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.packet.unit.symbol() {
            "" => write!(f, "{}: {}", self.packet.name, self.value),
            unit => write!(f, "{}: {} {}", self.packet.name, self.value, unit),
        }
    }
}

fn check_len(expected: usize, actual: usize) -> Result<(), DecodeError> {
    if expected != actual {
        return Err(DecodeError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Decode one packet's bytes according to its catalog entry
pub fn decode_value(packet: &SensorPacket, bytes: &[u8]) -> Result<SensorValue, DecodeError> {
    check_len(packet.bytes(), bytes.len())?;
    Ok(match (packet.size, packet.kind) {
        (PacketSize::One, ValueKind::Unsigned) => SensorValue::U8(bytes[0]),
        (PacketSize::One, ValueKind::Signed) => SensorValue::I8(bytes[0] as i8),
        (PacketSize::Two, ValueKind::Unsigned) => SensorValue::U16(BigEndian::read_u16(bytes)),
        (PacketSize::Two, ValueKind::Signed) => SensorValue::I16(BigEndian::read_i16(bytes)),
    })
}

/// Total response size for a list of packets
pub fn list_size(packets: &[SensorPacket]) -> usize {
    packets.iter().map(SensorPacket::bytes).sum()
}

/// Slice a batched response into one slot per requested packet, in request order
pub fn split_list<'a>(
    packets: &[SensorPacket],
    bytes: &'a [u8],
) -> Result<Vec<&'a [u8]>, DecodeError> {
    check_len(list_size(packets), bytes.len())?;

    let mut slots = Vec::with_capacity(packets.len());
    let mut offset = 0;
    for packet in packets {
        let end = offset + packet.bytes();
        slots.push(&bytes[offset..end]);
        offset = end;
    }
    Ok(slots)
}

/// Decode a batched response into values in request order
pub fn decode_list(packets: &[SensorPacket], bytes: &[u8]) -> Result<Vec<SensorValue>, DecodeError> {
    split_list(packets, bytes)?
        .into_iter()
        .zip(packets)
        .map(|(slot, packet)| decode_value(packet, slot))
        .collect()
}

/// Decode a sensor group response into readings in member order
pub fn decode_group(group: &SensorGroup, bytes: &[u8]) -> Result<Vec<Reading>, DecodeError> {
    check_len(group.size, bytes.len())?;
    let members = group.members();
    Ok(decode_list(members, bytes)?
        .into_iter()
        .zip(members)
        .map(|(value, packet)| Reading {
            packet: *packet,
            value,
        })
        .collect())
}
