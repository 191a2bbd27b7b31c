use oibot_core::catalog::{self, baud, groups, sensors, OpCode, PacketSize, ValueKind};
use oibot_core::heading::{classify, glyph, Direction, OCTANTS, UNKNOWN_GLYPH};
use oibot_core::sensors::{decode_group, SensorValue};
use pretty_assertions::assert_eq;
use rand::Rng;

#[test]
fn test_opcodes_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in OpCode::ALL {
        assert!(seen.insert(code.byte()), "duplicate opcode {}", code.byte());
        assert_eq!(OpCode::try_from(code.byte()), Ok(code));
    }
    assert_eq!(OpCode::try_from(0), Err(0));
}

#[test]
fn test_only_queries_expect_responses() {
    let responders: Vec<OpCode> = OpCode::ALL
        .into_iter()
        .filter(|c| c.expects_response())
        .collect();
    assert_eq!(responders, vec![OpCode::Query, OpCode::QueryList]);
}

#[test]
fn test_packet_table_is_dense() {
    for id in sensors::FIRST_ID..=sensors::LAST_ID {
        let packet = sensors::packet(id).expect("every id in range is cataloged");
        assert_eq!(packet.id, id);
        assert_eq!(catalog::response_size(id), Some(packet.bytes()));
    }
    assert!(sensors::packet(sensors::LAST_ID + 1).is_none());
}

#[test]
fn test_packet_shapes() {
    assert_eq!(sensors::VOLTAGE.size, PacketSize::Two);
    assert_eq!(sensors::VOLTAGE.kind, ValueKind::Unsigned);
    assert_eq!(sensors::CURRENT.kind, ValueKind::Signed);
    assert_eq!(sensors::TEMPERATURE.size, PacketSize::One);
    assert_eq!(sensors::TEMPERATURE.kind, ValueKind::Signed);
    assert_eq!(sensors::ANGLE.kind, ValueKind::Signed);
}

#[test]
fn test_group_sizes_match_members() {
    for group in groups::ALL.iter() {
        assert_eq!(
            group.size,
            group.member_bytes(),
            "group {} size disagrees with its members",
            group.id
        );
        assert_eq!(catalog::response_size(group.id), Some(group.size));
    }
}

#[test]
fn test_group_decode_follows_catalog_order() {
    let mut rng = rand::thread_rng();
    let group = &groups::GROUP_101;
    let bytes: Vec<u8> = (0..group.size).map(|_| rng.gen()).collect();

    let readings = decode_group(group, &bytes).expect("sized response");
    assert_eq!(readings.len(), group.members().len());

    let mut offset = 0;
    for reading in &readings {
        let width = reading.packet.bytes();
        let raw = &bytes[offset..offset + width];
        let expected = match (reading.value, raw) {
            (SensorValue::U8(v), [b]) => v as i32 == *b as i32,
            (SensorValue::I8(v), [b]) => v as i32 == *b as i8 as i32,
            (SensorValue::U16(v), [hi, lo]) => v == u16::from_be_bytes([*hi, *lo]),
            (SensorValue::I16(v), [hi, lo]) => v == i16::from_be_bytes([*hi, *lo]),
            _ => false,
        };
        assert!(expected, "packet {} decoded wrong", reading.packet.name);
        offset += width;
    }
    assert_eq!(offset, bytes.len());
}

#[test]
fn test_baud_codes() {
    for (code, &rate) in baud::SUPPORTED_RATES.iter().enumerate() {
        assert_eq!(baud::code_for_rate(rate), Ok(code as u8));
        assert_eq!(baud::rate_for_code(code as u8), Some(rate));
    }
    assert!(!baud::is_supported(230400));
}

#[test]
fn test_heading_covers_every_angle() {
    for angle in -720..=720 {
        let (glyph, direction) = classify(angle, 0);
        assert_ne!(glyph, UNKNOWN_GLYPH, "angle {}", angle);
        assert_ne!(direction, Direction::Stop, "angle {}", angle);
    }
}

#[test]
fn test_heading_octants_do_not_overlap() {
    for angle in -359..360 {
        let hits = OCTANTS.iter().filter(|o| o.contains(angle)).count();
        assert_eq!(hits, 1, "angle {} matched {} octants", angle, hits);
    }
}

#[test]
fn test_heading_glyph_matches_classify() {
    for angle in [0, 45, 90, 135, 180, 225, 270, 315, -45, -90] {
        for weight in 0..=4 {
            let (g, direction) = classify(angle, weight);
            assert_eq!(glyph(direction, weight), g);
        }
    }
    assert_eq!(classify(90, 9), (UNKNOWN_GLYPH, Direction::Stop));
}
