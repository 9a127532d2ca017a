//! Ultrasonic range finder
//!
//! A free-running PWM output triggers the sensor; the echo line is captured
//! on both edges with a 16-bit, 1 MHz timestamp. The edge handler runs
//! [`Capture::on_edge`], the main loop calls [`measure_pulse_width`] (or the
//! bounded [`measure_pulse_width_until`]) to wait for the next sample.

use crate::config::ECHO_TICKS_PER_CM;
use crate::sync::CaptureCell;

/// Trigger waveform for the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerTiming {
    /// Trigger period in microseconds
    pub period_us: u32,
    /// Trigger high time in microseconds
    pub high_us: u32,
}

impl Default for TriggerTiming {
    fn default() -> Self {
        Self {
            period_us: 26_600,
            high_us: 500,
        }
    }
}

impl TriggerTiming {
    /// Trigger frequency, rounded to the nearest hertz
    pub fn frequency_hz(&self) -> u32 {
        let period = self.period_us.max(1);
        ((1_000_000 + period / 2) / period).max(1)
    }

    /// Period the PWM actually runs at, in microseconds
    pub fn programmed_period_us(&self) -> u32 {
        1_000_000 / self.frequency_hz()
    }

    /// Compare value giving `high_us` on a PWM with range `max_duty`
    ///
    /// Scaled against the programmed period, so the high time holds even
    /// though the frequency was rounded.
    pub fn duty_for(&self, max_duty: u16) -> u16 {
        let duty =
            max_duty as u64 * self.high_us as u64 * self.frequency_hz() as u64 / 1_000_000;
        // Never zero: the sensor needs some trigger pulse
        (duty.min(max_duty as u64) as u16).max(1).min(max_duty)
    }
}

/// Echo line edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Capture handler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureState {
    /// Not yet armed
    Idle,
    /// Waiting for the echo to start
    ArmedForRising,
    /// Echo in progress, start recorded
    ArmedForFalling,
    /// Sample published, waiting for the reader to consume it
    Ready,
}

/// Handler-side capture state machine
#[derive(Debug, Clone)]
pub struct Capture {
    state: CaptureState,
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}

impl Capture {
    pub const fn new() -> Self {
        Self {
            state: CaptureState::Idle,
        }
    }

    /// Start listening for echoes
    pub fn arm(&mut self) {
        self.state = CaptureState::ArmedForRising;
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Handle a captured edge
    ///
    /// Edges arriving out of order are dropped. A rising edge is also
    /// dropped while a published sample is still unread.
    pub fn on_edge(&mut self, edge: Edge, timestamp: u16, cell: &CaptureCell) {
        use CaptureState::*;

        self.state = match (self.state, edge) {
            (Idle, _) => Idle,

            // Unread sample: hold it until the reader takes it
            (Ready, Edge::Rising) if cell.is_ready() => Ready,
            // Missed falling edge: restart on the new pulse
            (ArmedForRising | ArmedForFalling | Ready, Edge::Rising) => {
                cell.record_start(timestamp);
                ArmedForFalling
            }

            (ArmedForFalling, Edge::Falling) => {
                cell.record_end(timestamp);
                Ready
            }
            (state, Edge::Falling) => state,
        };
    }
}

/// Blocking measurements read from an echo source
///
/// [`CaptureCell`] is the hardware-backed source; tests substitute a
/// simulated one.
pub trait EchoSource {
    /// Discard any unread sample so the next one is fresh
    fn rearm(&self);

    /// Take a published sample's width in ticks, if one is ready
    fn take_width(&self) -> Option<u16>;
}

/// Range finder errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// No echo before the deadline
    Timeout,
}

/// Wait for the next echo and return its width in ticks
///
/// Spins until the capture handler publishes a sample. Never returns if the
/// sensor never echoes.
pub fn measure_pulse_width<E: EchoSource + ?Sized>(echo: &E) -> u16 {
    echo.rearm();
    loop {
        if let Some(width) = echo.take_width() {
            return width;
        }
        core::hint::spin_loop();
    }
}

/// Like [`measure_pulse_width`], giving up once `expired` returns true
pub fn measure_pulse_width_until<E, F>(echo: &E, mut expired: F) -> Result<u16, RangeError>
where
    E: EchoSource + ?Sized,
    F: FnMut() -> bool,
{
    echo.rearm();
    loop {
        if let Some(width) = echo.take_width() {
            return Ok(width);
        }
        if expired() {
            return Err(RangeError::Timeout);
        }
        core::hint::spin_loop();
    }
}

/// Convert an echo width to centimetres
pub fn ticks_to_cm(ticks: u16) -> f32 {
    ticks as f32 / ECHO_TICKS_PER_CM
}

/// Whether someone is sitting in front of the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Presence {
    /// No reading yet, or the last reading failed
    #[default]
    Unknown,
    Present,
    Absent,
}

impl Presence {
    /// Classify a distance against the threshold
    pub fn from_distance(cm: f32, threshold_cm: u16) -> Self {
        if cm < threshold_cm as f32 {
            Presence::Present
        } else {
            Presence::Absent
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present)
    }
}
