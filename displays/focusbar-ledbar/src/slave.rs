//! I2C target handler
//!
//! The controller writes one byte per update. Each received byte is
//! latched and rendered on the spot; a stop condition is acknowledged and
//! a NACK re-issues the handshake. There is no queueing of levels: the
//! bar shows whatever arrived last.

use focusbar_hal::{I2cTarget, TargetEvent};
use focusbar_protocol::{Level, SegmentPattern};
use heapless::Deque;

use crate::bar::SegmentBank;

/// Follow-up the bus driver must perform after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetAction {
    None,
    /// Clear the stop-condition flag
    ClearStop,
    /// Restart the start/acknowledge handshake
    Restart,
}

/// LED bar state plus its segment bank
pub struct LedBar<S> {
    bank: S,
    led_level: u8,
    received: u32,
}

impl<S: SegmentBank> LedBar<S> {
    /// Take the bank and blank it
    pub fn new(mut bank: S) -> Self {
        bank.show(SegmentPattern::OFF);
        Self {
            bank,
            led_level: 0,
            received: 0,
        }
    }

    /// Last byte received, as sent
    pub fn led_level(&self) -> u8 {
        self.led_level
    }

    /// Level currently displayed
    pub fn level(&self) -> Level {
        Level::from_byte(self.led_level)
    }

    /// Bytes received since boot
    pub fn received(&self) -> u32 {
        self.received
    }

    pub fn bank(&self) -> &S {
        &self.bank
    }

    /// Handle one bus event
    pub fn on_event(&mut self, event: TargetEvent) -> TargetAction {
        match event {
            TargetEvent::Received(byte) => {
                self.led_level = byte;
                self.received = self.received.wrapping_add(1);
                self.bank.show(SegmentPattern::for_byte(byte));
                TargetAction::None
            }
            TargetEvent::Stop => TargetAction::ClearStop,
            TargetEvent::Nack => TargetAction::Restart,
        }
    }

    /// Drain every pending event from `target`
    ///
    /// Returns the number of events handled.
    pub fn service<T: I2cTarget + ?Sized>(&mut self, target: &mut T) -> usize {
        let mut handled = 0;
        while let Some(event) = target.poll_event() {
            match self.on_event(event) {
                TargetAction::None => {}
                TargetAction::ClearStop => target.clear_stop(),
                TargetAction::Restart => target.restart(),
            }
            handled += 1;
        }
        handled
    }
}

/// Buffered [`I2cTarget`] for async bus drivers
///
/// The driver task pushes what the peripheral reported after each
/// transaction; [`LedBar::service`] then drains it. Requested restarts
/// are latched until the driver collects them.
#[derive(Debug, Default)]
pub struct EventQueue<const N: usize> {
    events: Deque<TargetEvent, N>,
    stops: u32,
    restart: bool,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            stops: 0,
            restart: false,
        }
    }

    /// Queue an event, handing it back if the queue is full
    pub fn push(&mut self, event: TargetEvent) -> Result<(), TargetEvent> {
        self.events.push_back(event)
    }

    /// Queue the events of one completed write: its bytes, then a stop
    ///
    /// Bytes that do not fit are dropped; returns how many were queued.
    pub fn push_write(&mut self, bytes: &[u8]) -> usize {
        let mut queued = 0;
        for &byte in bytes {
            if self.events.len() + 1 >= N {
                break;
            }
            if self.push(TargetEvent::Received(byte)).is_ok() {
                queued += 1;
            }
        }
        let _ = self.push(TargetEvent::Stop);
        queued
    }

    /// Collect a pending restart request
    pub fn take_restart(&mut self) -> bool {
        core::mem::take(&mut self.restart)
    }

    /// Stop conditions acknowledged so far
    pub fn stops_cleared(&self) -> u32 {
        self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<const N: usize> I2cTarget for EventQueue<N> {
    fn poll_event(&mut self) -> Option<TargetEvent> {
        self.events.pop_front()
    }

    fn clear_stop(&mut self) {
        self.stops = self.stops.wrapping_add(1);
    }

    fn restart(&mut self) {
        self.restart = true;
    }
}
