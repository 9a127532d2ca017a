//! Push-button debouncer
//!
//! Runs inside the button's falling-edge handler. The handler masks its own
//! interrupt, waits a short fixed settle time, re-samples the pin and only
//! then reports a press. The delay is deliberately a bounded busy delay in
//! handler context.

use embedded_hal::delay::DelayNs;
use focusbar_hal::EdgeLine;

use crate::config::DEBOUNCE_SETTLE_US;
use crate::sync::Flag;

/// Debouncer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Interrupt enabled, waiting for an edge
    Armed,
    /// Interrupt masked while the contacts settle
    Suppressed,
}

/// Falling-edge debouncer
#[derive(Debug, Clone)]
pub struct Debouncer {
    state: DebounceState,
    settle_us: u32,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_SETTLE_US)
    }
}

impl Debouncer {
    pub const fn new(settle_us: u32) -> Self {
        Self {
            state: DebounceState::Armed,
            settle_us,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Handle a falling edge on `line`
    ///
    /// Raises `pressed` if the line is still asserted after the settle
    /// interval, and returns whether it did. The line is re-armed on every
    /// path, including a rejected bounce.
    pub fn on_falling_edge<L, D>(&mut self, line: &mut L, delay: &mut D, pressed: &Flag) -> bool
    where
        L: EdgeLine,
        D: DelayNs,
    {
        line.disable_interrupt();
        line.clear_pending();
        self.state = DebounceState::Suppressed;

        delay.delay_us(self.settle_us);

        let confirmed = line.is_asserted();
        if confirmed {
            pressed.raise();
        }

        line.clear_pending();
        line.enable_interrupt();
        self.state = DebounceState::Armed;

        confirmed
    }
}
