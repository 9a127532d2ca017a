//! Segment bank

use focusbar_hal::OutputPin;
use focusbar_protocol::{SegmentPattern, SEGMENT_COUNT};

/// Something that can show a segment pattern
pub trait SegmentBank {
    /// Light exactly the segments set in `pattern`
    fn show(&mut self, pattern: SegmentPattern);
}

/// Eight segment LEDs on individual GPIO outputs
///
/// Segment `i` is lit when bit `i` of the pattern is set; pins are
/// active-high.
pub struct GpioSegments<P> {
    pins: [P; SEGMENT_COUNT],
    shown: SegmentPattern,
}

impl<P: OutputPin> GpioSegments<P> {
    /// Take the pins and switch every segment off
    pub fn new(mut pins: [P; SEGMENT_COUNT]) -> Self {
        for pin in pins.iter_mut() {
            pin.set_low();
        }
        Self {
            pins,
            shown: SegmentPattern::OFF,
        }
    }

    /// Pattern currently on the pins
    pub fn shown(&self) -> SegmentPattern {
        self.shown
    }

    pub fn pins(&self) -> &[P; SEGMENT_COUNT] {
        &self.pins
    }
}

impl<P: OutputPin> SegmentBank for GpioSegments<P> {
    fn show(&mut self, pattern: SegmentPattern) {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            pin.set_state(pattern.is_lit(i));
        }
        self.shown = pattern;
    }
}
