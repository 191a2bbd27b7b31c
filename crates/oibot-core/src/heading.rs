//! Heading display
//!
//! Maps an angle reading to one of eight compass octants and an arrow
//! glyph whose stroke weight reflects an intensity from 0 to 4.
//!
//! Angles follow the OI convention: positive is counter-clockwise, so
//! +90 is [`Direction::Left`]. Inputs are reduced with Rust's `%`, which
//! keeps the sign of the dividend; the bound table therefore lists a
//! mirrored range for negative angles instead of normalizing to `0..360`.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Glyph returned when the angle or weight cannot be classified
pub const UNKNOWN_GLYPH: char = '?';

/// Highest intensity weight
pub const MAX_WEIGHT: u8 = 4;

/// Heading octant, or `Stop` when none applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Straight ahead
    Fwd,
    /// Ahead and to the left
    FwdLeft,
    /// Left
    Left,
    /// Behind and to the left
    BackLeft,
    /// Behind
    Back,
    /// Behind and to the right
    BackRight,
    /// Right
    Right,
    /// Ahead and to the right
    FwdRight,
    /// No heading
    Stop,
}

impl Direction {
    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            Direction::Fwd => "fwd",
            Direction::FwdLeft => "fwd-left",
            Direction::Left => "left",
            Direction::BackLeft => "back-left",
            Direction::Back => "back",
            Direction::BackRight => "back-right",
            Direction::Right => "right",
            Direction::FwdRight => "fwd-right",
            Direction::Stop => "stop",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the bound table
#[derive(Debug)]
pub struct Octant {
    /// Direction this row classifies to
    pub direction: Direction,
    /// Half-open degree ranges over the reduced angle
    pub bounds: &'static [Range<i32>],
    /// Arrow glyphs from lightest (weight 0) to heaviest (weight 4)
    pub glyphs: [char; 5],
}

impl Octant {
    /// Check whether a reduced angle falls in this octant
    pub fn contains(&self, angle: i32) -> bool {
        self.bounds.iter().any(|r| r.contains(&angle))
    }
}

// Wide-headed barb arrows, U+1F860..U+1F887. Each weight block lists
// left, up, right, down, up-left, up-right, down-right, down-left.
const fn arrows(offset: u32) -> [char; 5] {
    let mut out = [UNKNOWN_GLYPH; 5];
    let mut w = 0;
    while w < 5 {
        out[w] = match char::from_u32(0x1F860 + 8 * w as u32 + offset) {
            Some(c) => c,
            None => UNKNOWN_GLYPH,
        };
        w += 1;
    }
    out
}

/// Octant bound table, searched in order
pub static OCTANTS: [Octant; 8] = [
    Octant {
        direction: Direction::Fwd,
        bounds: &[-22..23, 338..360, -360..-337],
        glyphs: arrows(1),
    },
    Octant {
        direction: Direction::FwdLeft,
        bounds: &[23..68, -337..-292],
        glyphs: arrows(4),
    },
    Octant {
        direction: Direction::Left,
        bounds: &[68..113, -292..-247],
        glyphs: arrows(0),
    },
    Octant {
        direction: Direction::BackLeft,
        bounds: &[113..158, -247..-202],
        glyphs: arrows(7),
    },
    Octant {
        direction: Direction::Back,
        bounds: &[158..203, -202..-157],
        glyphs: arrows(3),
    },
    Octant {
        direction: Direction::BackRight,
        bounds: &[203..248, -157..-112],
        glyphs: arrows(6),
    },
    Octant {
        direction: Direction::Right,
        bounds: &[248..293, -112..-67],
        glyphs: arrows(2),
    },
    Octant {
        direction: Direction::FwdRight,
        bounds: &[293..338, -67..-22],
        glyphs: arrows(5),
    },
];

/// Classify a heading angle (degrees, any value) at the given intensity weight
pub fn classify(angle: i32, weight: u8) -> (char, Direction) {
    if weight > MAX_WEIGHT {
        return (UNKNOWN_GLYPH, Direction::Stop);
    }
    let reduced = angle % 360;
    OCTANTS
        .iter()
        .find(|o| o.contains(reduced))
        .map(|o| (o.glyphs[weight as usize], o.direction))
        .unwrap_or((UNKNOWN_GLYPH, Direction::Stop))
}

/// Glyph for a direction at the given weight
pub fn glyph(direction: Direction, weight: u8) -> char {
    OCTANTS
        .iter()
        .find(|o| o.direction == direction)
        .and_then(|o| o.glyphs.get(weight as usize).copied())
        .unwrap_or(UNKNOWN_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward() {
        assert_eq!(classify(0, 2), ('\u{1F871}', Direction::Fwd));
        assert_eq!(classify(-0, 2), classify(0, 2));
    }

    #[test]
    fn test_bad_weight() {
        for angle in [-720, -45, 0, 90, 359, 10_000] {
            assert_eq!(classify(angle, 7), (UNKNOWN_GLYPH, Direction::Stop));
        }
    }

    #[test]
    fn test_positive_octants() {
        assert_eq!(classify(45, 0).1, Direction::FwdLeft);
        assert_eq!(classify(90, 0).1, Direction::Left);
        assert_eq!(classify(135, 0).1, Direction::BackLeft);
        assert_eq!(classify(180, 0).1, Direction::Back);
        assert_eq!(classify(225, 0).1, Direction::BackRight);
        assert_eq!(classify(270, 0).1, Direction::Right);
        assert_eq!(classify(315, 0).1, Direction::FwdRight);
        assert_eq!(classify(350, 0).1, Direction::Fwd);
    }

    #[test]
    fn test_negative_angles_mirror() {
        assert_eq!(classify(-45, 1).1, Direction::FwdRight);
        assert_eq!(classify(-90, 1).1, Direction::Right);
        assert_eq!(classify(-180, 1).1, Direction::Back);
        assert_eq!(classify(-270, 1).1, Direction::Left);
        assert_eq!(classify(-350, 1).1, Direction::Fwd);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(classify(360, 3), classify(0, 3));
        assert_eq!(classify(450, 3), classify(90, 3));
        assert_eq!(classify(-450, 3), classify(-90, 3));
        assert_eq!(classify(i32::MIN, 0).1, classify(i32::MIN % 360, 0).1);
    }

    #[test]
    fn test_seams() {
        assert_eq!(classify(22, 0).1, Direction::Fwd);
        assert_eq!(classify(23, 0).1, Direction::FwdLeft);
        assert_eq!(classify(-22, 0).1, Direction::Fwd);
        assert_eq!(classify(-23, 0).1, Direction::FwdRight);
        assert_eq!(classify(337, 0).1, Direction::FwdRight);
        assert_eq!(classify(-337, 0).1, Direction::FwdLeft);
        assert_eq!(classify(-338, 0).1, Direction::Fwd);
    }

    #[test]
    fn test_every_reduced_angle_classifies() {
        for angle in -359..360 {
            assert_ne!(classify(angle, 0).1, Direction::Stop, "angle {angle}");
        }
    }

    #[test]
    fn test_glyph_weights_differ() {
        let weights: Vec<char> = (0..=MAX_WEIGHT).map(|w| glyph(Direction::Left, w)).collect();
        assert_eq!(weights[0], '\u{1F860}');
        assert_eq!(weights[4], '\u{1F880}');
        assert_eq!(glyph(Direction::Stop, 0), UNKNOWN_GLYPH);
    }
}
