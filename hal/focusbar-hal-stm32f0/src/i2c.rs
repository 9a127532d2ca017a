//! I2C configuration and error conversion for STM32F0

use embassy_stm32::i2c::{Config, Error as I2cError};
use embassy_stm32::time::Hertz;
use embassy_time::Duration;
use focusbar_hal::i2c::I2cConfig;
use focusbar_hal::TargetEvent;

/// Bound on any single bus transfer
pub const BUS_TIMEOUT: Duration = Duration::from_millis(10);

/// Embassy configuration for a link endpoint
///
/// Internal pull-ups are enabled; the link is short enough to run
/// without external resistors.
pub fn embassy_config(config: I2cConfig) -> Config {
    let mut i2c_config = Config::default();
    i2c_config.frequency = Hertz(config.frequency);
    i2c_config.sda_pullup = true;
    i2c_config.scl_pullup = true;
    i2c_config.timeout = BUS_TIMEOUT;
    i2c_config
}

/// Target-mode event implied by a failed transfer, if any
pub fn target_event_for(error: I2cError) -> Option<TargetEvent> {
    match error {
        I2cError::Nack => Some(TargetEvent::Nack),
        _ => None,
    }
}
