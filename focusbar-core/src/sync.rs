//! Single-slot cells shared between event handlers and the main loop
//!
//! Every cell has exactly one writer context and one reader context. The
//! cells are plain atomics, so they can live in `static`s and be touched
//! from interrupt handlers without a lock. On targets without native
//! read-modify-write atomics (thumbv6m) `portable-atomic` falls back to a
//! critical section.

use portable_atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use crate::ranging::EchoSource;
use focusbar_protocol::Level;

/// One-shot event flag
///
/// Raised by a handler, taken by the main loop. Raising an already raised
/// flag is a no-op, so events coalesce rather than queue.
#[derive(Debug)]
pub struct Flag(AtomicBool);

impl Flag {
    /// Create a lowered flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raise the flag
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag, returning whether it was raised
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Check the flag without lowering it
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds spent in the current work state
///
/// Incremented by the time base once per heartbeat, reset by the work
/// cycle on every state transition.
#[derive(Debug)]
pub struct SecondsCounter(AtomicU32);

impl SecondsCounter {
    /// Create a counter at zero
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Add one second, returning the new count
    pub fn increment(&self) -> u32 {
        self.0.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    /// Reset to zero
    pub fn reset(&self) {
        self.0.store(0, Ordering::Release);
    }

    /// Current count
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for SecondsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Outbound bar level with a dirty bit
///
/// Value and dirty bit share one atomic so a reader never sees a torn pair.
/// Publishing overwrites whatever is pending: the newest level wins.
#[derive(Debug)]
pub struct LevelMailbox(AtomicU16);

const DIRTY: u16 = 0x0100;

impl LevelMailbox {
    /// Create an empty, clean mailbox
    pub const fn new() -> Self {
        Self(AtomicU16::new(0))
    }

    /// Publish a level, replacing any pending one
    pub fn publish(&self, level: Level) {
        self.0.store(DIRTY | level.value() as u16, Ordering::Release);
    }

    /// Take the pending level and clear the dirty bit
    pub fn take(&self) -> Option<Level> {
        let prev = self.0.fetch_and(!DIRTY, Ordering::AcqRel);
        if prev & DIRTY != 0 {
            Some(Level::clamped(prev as u8))
        } else {
            None
        }
    }

    /// Check whether a level is waiting to be sent
    pub fn is_dirty(&self) -> bool {
        self.0.load(Ordering::Acquire) & DIRTY != 0
    }

    /// Last published level, sent or not
    pub fn last(&self) -> Level {
        Level::clamped(self.0.load(Ordering::Acquire) as u8)
    }
}

impl Default for LevelMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// One ultrasonic echo sample
///
/// `start` is written on the rising edge, `end` and `ready` on the falling
/// edge. While `ready` is set the capture handler leaves the sample alone,
/// so the reader always sees a matching start/end pair.
#[derive(Debug)]
pub struct CaptureCell {
    start: AtomicU16,
    end: AtomicU16,
    ready: AtomicBool,
}

impl CaptureCell {
    /// Create an empty cell
    pub const fn new() -> Self {
        Self {
            start: AtomicU16::new(0),
            end: AtomicU16::new(0),
            ready: AtomicBool::new(false),
        }
    }

    /// Record the rising-edge timestamp
    pub fn record_start(&self, timestamp: u16) {
        self.start.store(timestamp, Ordering::Relaxed);
    }

    /// Record the falling-edge timestamp and publish the sample
    pub fn record_end(&self, timestamp: u16) {
        self.end.store(timestamp, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }

    /// Check whether a complete sample is waiting
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl Default for CaptureCell {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoSource for CaptureCell {
    fn rearm(&self) {
        self.ready.store(false, Ordering::Release);
    }

    fn take_width(&self) -> Option<u16> {
        if !self.ready.load(Ordering::Acquire) {
            return None;
        }
        let start = self.start.load(Ordering::Relaxed);
        let end = self.end.load(Ordering::Relaxed);
        self.ready.store(false, Ordering::Release);
        Some(end.wrapping_sub(start))
    }
}
