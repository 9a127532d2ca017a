//! Configuration defaults
//!
//! All parameters are compile-time constants. The controller firmware
//! generates its own values from `focusbar.toml` at build time and passes
//! them through [`Config`]; the defaults below cover everything else.

use crate::cycle::CycleConfig;
use crate::ranging::TriggerTiming;

/// Focus period length in seconds (25 minutes)
pub const DEFAULT_FOCUS_S: u32 = 25 * 60;

/// Break period length in seconds (5 minutes)
pub const DEFAULT_BREAK_S: u32 = 5 * 60;

/// Timer ticks per second
pub const DEFAULT_TICKS_PER_SECOND: u16 = 100;

/// Distance below which someone is considered at the desk
pub const DEFAULT_PRESENCE_THRESHOLD_CM: u16 = 60;

/// PWM carrier frequency for the RGB LED and buzzer
pub const DEFAULT_PWM_FREQUENCY_HZ: u32 = 1_000;

/// Button settle interval before the level is re-sampled
pub const DEBOUNCE_SETTLE_US: u32 = 1_000;

/// Echo timer ticks per centimetre (round trip, 1 MHz tick)
pub const ECHO_TICKS_PER_CM: f32 = 58.0;

/// Complete controller configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Work-cycle durations and colours
    pub cycle: CycleConfig,
    /// Time base tick rate
    pub ticks_per_second: u16,
    /// Presence threshold in centimetres
    pub presence_threshold_cm: u16,
    /// RGB/buzzer PWM frequency
    pub pwm_frequency_hz: u32,
    /// Range finder trigger waveform
    pub trigger: TriggerTiming,
    /// Button settle interval in microseconds
    pub debounce_settle_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycle: CycleConfig::default(),
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            presence_threshold_cm: DEFAULT_PRESENCE_THRESHOLD_CM,
            pwm_frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
            trigger: TriggerTiming::default(),
            debounce_settle_us: DEBOUNCE_SETTLE_US,
        }
    }
}

impl Config {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle.focus_s == 0 || self.cycle.break_s == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.trigger.high_us == 0 || self.trigger.high_us >= self.trigger.period_us {
            return Err(ConfigError::InvalidTrigger);
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Focus or break duration is zero
    ZeroDuration,
    /// Tick rate is zero
    ZeroTickRate,
    /// Trigger high time is zero or not shorter than the period
    InvalidTrigger,
}
