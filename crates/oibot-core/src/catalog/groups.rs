//! Sensor groups
//!
//! A group id can be queried like a packet id; the response is the
//! concatenation of its member packets in member order.

use super::sensors::{self, SensorPacket};

/// Ordered bundle of sensor packets returned as one contiguous response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorGroup {
    /// Group id sent with Query
    pub id: u8,
    /// Declared response size in bytes
    pub size: usize,
    first: u8,
    last: u8,
}

impl SensorGroup {
    const fn new(id: u8, size: usize, first: u8, last: u8) -> Self {
        Self {
            id,
            size,
            first,
            last,
        }
    }

    /// Member packets in wire order
    pub fn members(&self) -> &'static [SensorPacket] {
        sensors::span(self.first, self.last)
    }

    /// Sum of member sizes
    pub fn member_bytes(&self) -> usize {
        self.members().iter().map(SensorPacket::bytes).sum()
    }
}

/// Group 0: packets 7 to 26, 26 bytes
pub const GROUP_0: SensorGroup = SensorGroup::new(0, 26, 7, 26);
/// Group 1: packets 7 to 16, 10 bytes
pub const GROUP_1: SensorGroup = SensorGroup::new(1, 10, 7, 16);
/// Group 2: packets 17 to 20, 6 bytes
pub const GROUP_2: SensorGroup = SensorGroup::new(2, 6, 17, 20);
/// Group 3: packets 21 to 26, 10 bytes
pub const GROUP_3: SensorGroup = SensorGroup::new(3, 10, 21, 26);
/// Group 4: packets 27 to 34, 14 bytes
pub const GROUP_4: SensorGroup = SensorGroup::new(4, 14, 27, 34);
/// Group 5: packets 35 to 42, 12 bytes
pub const GROUP_5: SensorGroup = SensorGroup::new(5, 12, 35, 42);
/// Group 6: packets 7 to 42, 52 bytes
pub const GROUP_6: SensorGroup = SensorGroup::new(6, 52, 7, 42);
/// Group 100: packets 7 to 58, 80 bytes
pub const GROUP_100: SensorGroup = SensorGroup::new(100, 80, 7, 58);
/// Group 101: packets 43 to 58, 28 bytes
pub const GROUP_101: SensorGroup = SensorGroup::new(101, 28, 43, 58);
/// Group 106: packets 46 to 51, 12 bytes
pub const GROUP_106: SensorGroup = SensorGroup::new(106, 12, 46, 51);
/// Group 107: packets 54 to 58, 9 bytes
pub const GROUP_107: SensorGroup = SensorGroup::new(107, 9, 54, 58);

/// All sensor groups
pub static ALL: [SensorGroup; 11] = [
    GROUP_0, GROUP_1, GROUP_2, GROUP_3, GROUP_4, GROUP_5, GROUP_6, GROUP_100, GROUP_101,
    GROUP_106, GROUP_107,
];

/// Look up a sensor group by id
pub fn group(id: u8) -> Option<&'static SensorGroup> {
    ALL.iter().find(|g| g.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_sizes_match_members() {
        for g in &ALL {
            assert_eq!(g.size, g.member_bytes(), "group {}", g.id);
        }
    }

    #[test]
    fn test_group_zero_layout() {
        let g = group(0).expect("group 0 exists");
        assert_eq!(g.size, 26);
        assert_eq!(g.members().len(), 20);
        assert_eq!(g.members()[0].id, 7);
        assert_eq!(g.members()[19].id, 26);
    }

    #[test]
    fn test_unknown_group() {
        assert!(group(7).is_none());
        assert!(group(102).is_none());
    }
}
