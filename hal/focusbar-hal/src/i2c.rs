//! I2C target (slave) abstractions
//!
//! The controller side uses `embedded_hal::i2c::I2c` directly; the LED bar
//! only ever sees the bus as a stream of target-mode events.

/// An event raised by the I2C peripheral while addressed as a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetEvent {
    /// Receive buffer full, carrying the received byte
    Received(u8),
    /// Stop condition detected
    Stop,
    /// Negative acknowledge detected
    Nack,
}

/// I2C bus target
pub trait I2cTarget {
    /// Fetch the next pending event, if any
    fn poll_event(&mut self) -> Option<TargetEvent>;

    /// Clear the stop-condition flag
    fn clear_stop(&mut self);

    /// Re-issue the start/acknowledge handshake after a NACK
    fn restart(&mut self);
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };
}
