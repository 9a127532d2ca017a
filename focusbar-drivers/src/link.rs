//! I2C link master
//!
//! Sends the bar level to the LED bar as a single-byte write. The write
//! blocks until the bus transaction completes; a failed write is reported
//! and not retried.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use focusbar_core::traits::LevelLink;
use focusbar_protocol::{Level, LEDBAR_ADDRESS};

/// Link transfer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The LED bar did not acknowledge its address or the data byte
    Nack,
    /// Bus error or lost arbitration
    Bus,
    /// Any other controller error (overrun, timeout)
    Other,
}

impl LinkError {
    fn from_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => LinkError::Nack,
            ErrorKind::Bus | ErrorKind::ArbitrationLoss => LinkError::Bus,
            _ => LinkError::Other,
        }
    }
}

/// Bus master for the LED bar link
pub struct LinkMaster<I> {
    bus: I,
    address: u8,
    last_sent: Option<Level>,
}

impl<I: I2c> LinkMaster<I> {
    /// Master talking to the LED bar at its default address
    pub fn new(bus: I) -> Self {
        Self::with_address(bus, LEDBAR_ADDRESS)
    }

    pub fn with_address(bus: I, address: u8) -> Self {
        Self {
            bus,
            address,
            last_sent: None,
        }
    }

    /// Send a raw level byte
    ///
    /// Values above the bar size are clamped before going on the wire.
    pub fn send_byte(&mut self, value: u8) -> Result<(), LinkError> {
        let level = Level::clamped(value);
        self.bus
            .write(self.address, &[level.to_byte()])
            .map_err(|e| LinkError::from_kind(e.kind()))?;
        self.last_sent = Some(level);
        Ok(())
    }

    /// Last level the LED bar acknowledged
    pub fn last_sent(&self) -> Option<Level> {
        self.last_sent
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.bus
    }
}

impl<I: I2c> LevelLink for LinkMaster<I> {
    type Error = LinkError;

    fn send_level(&mut self, level: Level) -> Result<(), LinkError> {
        self.send_byte(level.to_byte())
    }
}
