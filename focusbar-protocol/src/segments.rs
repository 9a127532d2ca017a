//! Segment patterns for the 8-segment bar

use crate::level::{Level, MAX_LEVEL};

/// Number of physical segments on the bar
pub const SEGMENT_COUNT: usize = MAX_LEVEL as usize;

/// Bitmask of lit segments, bit 0 = first segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// All segments off
    pub const OFF: Self = Self(0);

    /// Pattern for a level: segments `1..=N` lit in order, the rest off
    pub const fn for_level(level: Level) -> Self {
        let n = level.value();
        if n >= MAX_LEVEL {
            Self(0xFF)
        } else {
            Self((1u8 << n) - 1)
        }
    }

    /// Pattern for a raw received byte
    pub const fn for_byte(byte: u8) -> Self {
        Self::for_level(Level::from_byte(byte))
    }

    /// Raw bitmask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether segment `index` (0-based) is lit
    pub const fn is_lit(self, index: usize) -> bool {
        index < SEGMENT_COUNT && self.0 & (1 << index) != 0
    }

    /// Number of lit segments
    pub const fn lit_count(self) -> u8 {
        self.0.count_ones() as u8
    }
}
