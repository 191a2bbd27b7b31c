//! Frame encoding
//!
//! A frame is one opcode byte followed by its payload. Multi-byte
//! fields are big-endian with no padding or alignment.
//!
//! Frame format:
//! - 1 byte: Opcode
//! - N bytes: Payload (fields packed in argument order)

use byteorder::{BigEndian, ByteOrder};

use crate::catalog::OpCode;

/// A single typed payload field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Unsigned byte
    U8(u8),
    /// Signed byte
    I8(i8),
    /// Unsigned 16-bit word
    U16(u16),
    /// Signed 16-bit word
    I16(i16),
}

impl Field {
    /// Encoded width in bytes
    pub fn width(&self) -> usize {
        match self {
            Field::U8(_) | Field::I8(_) => 1,
            Field::U16(_) | Field::I16(_) => 2,
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        match *self {
            Field::U8(v) => out.push(v),
            Field::I8(v) => out.push(v as u8),
            Field::U16(v) => {
                let mut buf = [0u8; 2];
                BigEndian::write_u16(&mut buf, v);
                out.extend_from_slice(&buf);
            }
            Field::I16(v) => {
                let mut buf = [0u8; 2];
                BigEndian::write_i16(&mut buf, v);
                out.extend_from_slice(&buf);
            }
        }
    }
}

/// Concatenate the big-endian encoding of each field in order
pub fn pack(fields: &[Field]) -> Vec<u8> {
    let mut out = Vec::with_capacity(fields.iter().map(Field::width).sum());
    for field in fields {
        field.write_to(&mut out);
    }
    out
}

/// Decode two big-endian signed words, the inverse of packing two `Field::I16`
pub fn unpack_i16_pair(data: &[u8]) -> Option<(i16, i16)> {
    if data.len() != 4 {
        return None;
    }
    Some((BigEndian::read_i16(&data[0..2]), BigEndian::read_i16(&data[2..4])))
}

/// An encoded command ready for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command opcode
    pub opcode: OpCode,
    /// Packed payload (may be empty)
    pub payload: Vec<u8>,
}

impl Frame {
    /// Create a frame from typed fields
    pub fn with_fields(opcode: OpCode, fields: &[Field]) -> Self {
        Self {
            opcode,
            payload: pack(fields),
        }
    }

    /// Encode the frame to raw bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_size());
        bytes.push(self.opcode.byte());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Get the total encoded size
    pub fn encoded_size(&self) -> usize {
        1 + self.payload.len()
    }
}

/// Builder for constructing frames
pub struct FrameBuilder {
    opcode: OpCode,
    payload: Vec<u8>,
}

impl FrameBuilder {
    /// Start a frame for the given opcode
    pub fn new(opcode: OpCode) -> Self {
        Self {
            opcode,
            payload: Vec::new(),
        }
    }

    /// Add a single byte
    pub fn byte(mut self, b: u8) -> Self {
        Field::U8(b).write_to(&mut self.payload);
        self
    }

    /// Add raw bytes
    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.payload.extend_from_slice(data);
        self
    }

    /// Build the frame
    pub fn build(self) -> Frame {
        Frame {
            opcode: self.opcode,
            payload: self.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_is_big_endian() {
        let bytes = pack(&[Field::I16(-200), Field::I16(500)]);
        assert_eq!(bytes, vec![0xFF, 0x38, 0x01, 0xF4]);
    }

    #[test]
    fn test_pack_mixed_widths() {
        let bytes = pack(&[Field::U8(3), Field::U16(0x1234), Field::I8(-1)]);
        assert_eq!(bytes, vec![3, 0x12, 0x34, 0xFF]);
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack(&[]).is_empty());
    }

    #[test]
    fn test_drive_payload_roundtrip() {
        let frame = Frame::with_fields(OpCode::Drive, &[Field::I16(200), Field::I16(500)]);
        assert_eq!(frame.encoded_size(), 5);
        assert_eq!(unpack_i16_pair(&frame.payload), Some((200, 500)));
    }

    #[test]
    fn test_frame_builder() {
        let frame = FrameBuilder::new(OpCode::QueryList)
            .byte(2)
            .bytes(&[21, 22])
            .build();

        assert_eq!(frame.to_bytes(), vec![149, 2, 21, 22]);
    }

    #[test]
    fn test_unpack_wrong_length() {
        assert_eq!(unpack_i16_pair(&[0, 1, 2]), None);
    }
}
