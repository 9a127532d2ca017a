//! Bar level encoding
//!
//! The controller never forwards a level above [`MAX_LEVEL`]; the LED bar
//! tolerates larger bytes by lighting every segment.

/// Highest level the bar can show
pub const MAX_LEVEL: u8 = 8;

/// Number of lit segments, always in `0..=MAX_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Level(u8);

impl Level {
    /// Empty bar
    pub const EMPTY: Self = Self(0);

    /// Full bar
    pub const FULL: Self = Self(MAX_LEVEL);

    /// Create a level, clamping to [`MAX_LEVEL`]
    pub const fn clamped(value: u8) -> Self {
        if value > MAX_LEVEL {
            Self(MAX_LEVEL)
        } else {
            Self(value)
        }
    }

    /// Proportional level for `elapsed` out of `duration`
    ///
    /// `min(8, elapsed * 8 / duration)`. A zero duration counts as
    /// already complete.
    pub fn proportional(elapsed: u32, duration: u32) -> Self {
        if duration == 0 {
            return Self::FULL;
        }
        let scaled = (elapsed as u64 * MAX_LEVEL as u64) / duration as u64;
        Self(scaled.min(MAX_LEVEL as u64) as u8)
    }

    /// Raw level value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Encode for the wire
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Decode a received byte
    pub const fn from_byte(byte: u8) -> Self {
        Self::clamped(byte)
    }
}

impl From<u8> for Level {
    fn from(value: u8) -> Self {
        Self::clamped(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp() {
        assert_eq!(Level::clamped(0).value(), 0);
        assert_eq!(Level::clamped(8).value(), 8);
        assert_eq!(Level::clamped(9).value(), 8);
        assert_eq!(Level::clamped(255), Level::FULL);
    }

    #[test]
    fn test_proportional_midpoint() {
        // 50 s into a 100 s focus period
        assert_eq!(Level::proportional(50, 100).value(), 4);
    }

    #[test]
    fn test_proportional_edges() {
        assert_eq!(Level::proportional(0, 100), Level::EMPTY);
        assert_eq!(Level::proportional(99, 100).value(), 7);
        assert_eq!(Level::proportional(100, 100), Level::FULL);
        assert_eq!(Level::proportional(500, 100), Level::FULL);
        assert_eq!(Level::proportional(0, 0), Level::FULL);
    }

    #[test]
    fn test_proportional_no_overflow() {
        assert_eq!(Level::proportional(u32::MAX, u32::MAX), Level::FULL);
    }

    proptest! {
        #[test]
        fn prop_wire_byte_never_exceeds_max(value in any::<u8>()) {
            let byte = Level::from(value).to_byte();
            prop_assert!(byte <= MAX_LEVEL);
            prop_assert_eq!(byte, value.min(MAX_LEVEL));
        }

        #[test]
        fn prop_proportional_is_monotonic(
            duration in 1u32..100_000,
            a in 0u32..200_000,
            b in 0u32..200_000,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Level::proportional(lo, duration) <= Level::proportional(hi, duration));
        }
    }
}
