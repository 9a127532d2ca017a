//! Interrupt-capable input lines

use crate::gpio::InputPin;

/// An input pin wired to an edge-triggered interrupt source
///
/// The button debouncer masks the source while it settles so that contact
/// bounce cannot re-enter the handler.
pub trait EdgeLine: InputPin {
    /// Mask the interrupt source
    fn disable_interrupt(&mut self);

    /// Unmask the interrupt source
    fn enable_interrupt(&mut self);

    /// Clear the pending edge flag
    fn clear_pending(&mut self);

    /// Check if the line is at its active (pressed) level
    ///
    /// Buttons are wired active-low by default.
    fn is_asserted(&self) -> bool {
        self.is_low()
    }
}
