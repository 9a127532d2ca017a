//! Status LED heartbeat

use focusbar_hal::OutputPin;

/// Blinks a status LED, one toggle per second
pub struct Heartbeat<P> {
    led: P,
}

impl<P: OutputPin> Heartbeat<P> {
    pub fn new(mut led: P) -> Self {
        led.set_low();
        Self { led }
    }

    /// Call once per second; returns the new LED state
    pub fn on_second(&mut self) -> bool {
        self.led.toggle();
        self.led.is_set_high()
    }
}
