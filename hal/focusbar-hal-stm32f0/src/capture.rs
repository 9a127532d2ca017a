//! Echo pulse capture on a timer input channel

use embassy_stm32::timer::input_capture::InputCapture;
use embassy_stm32::timer::{Channel, GeneralInstance4Channel};

/// Capture counter rate
///
/// One tick per microsecond, the rate the echo-to-distance constant
/// assumes.
pub const CAPTURE_TICK_HZ: u32 = 1_000_000;

/// Timer channel wired to the range finder's echo line
///
/// The counter runs free over its full range. Each wait arms the channel
/// for one polarity, so the edge is known from the capture itself and the
/// timestamp is the latched compare register, not the time the task woke.
pub struct EchoCapture<'d, T: GeneralInstance4Channel> {
    capture: InputCapture<'d, T>,
    channel: Channel,
}

impl<'d, T: GeneralInstance4Channel> EchoCapture<'d, T> {
    pub fn new(capture: InputCapture<'d, T>, channel: Channel) -> Self {
        Self { capture, channel }
    }

    /// Wait for the echo to start; returns the captured count
    pub async fn rising_edge(&mut self) -> u16 {
        // Low 16 bits; pulse widths are taken modulo 2^16
        self.capture.wait_for_rising_edge(self.channel).await as u16
    }

    /// Wait for the echo to end; returns the captured count
    pub async fn falling_edge(&mut self) -> u16 {
        self.capture.wait_for_falling_edge(self.channel).await as u16
    }
}
