//! Time base
//!
//! Turns a fixed-rate timer tick into whole seconds and a heartbeat
//! toggle. Runs in handler context: no blocking, no failure modes.

use crate::config::DEFAULT_TICKS_PER_SECOND;

/// Emitted once per second by [`TimeBase::on_tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Heartbeat {
    /// Heartbeat LED level after the toggle
    pub led_on: bool,
}

/// Sub-second tick counter
#[derive(Debug, Clone)]
pub struct TimeBase {
    ticks_per_second: u16,
    subticks: u16,
    led_on: bool,
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND)
    }
}

impl TimeBase {
    /// Create a time base for the given tick rate
    ///
    /// A rate of zero is treated as one tick per second.
    pub const fn new(ticks_per_second: u16) -> Self {
        Self {
            ticks_per_second: if ticks_per_second == 0 {
                1
            } else {
                ticks_per_second
            },
            subticks: 0,
            led_on: false,
        }
    }

    /// Handle one timer tick
    ///
    /// Returns a heartbeat on every full-second boundary.
    pub fn on_tick(&mut self) -> Option<Heartbeat> {
        self.subticks += 1;
        if self.subticks < self.ticks_per_second {
            return None;
        }

        self.subticks = 0;
        self.led_on = !self.led_on;
        Some(Heartbeat {
            led_on: self.led_on,
        })
    }

    /// Configured tick rate
    pub fn ticks_per_second(&self) -> u16 {
        self.ticks_per_second
    }

    /// Tick period in microseconds
    pub fn tick_period_us(&self) -> u32 {
        1_000_000 / self.ticks_per_second as u32
    }
}
