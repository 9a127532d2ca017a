//! RGB LED and buzzer output trait

use crate::indicator::Rgb;

/// Trait for the desk indicator (RGB LED plus buzzer)
///
/// Implementations map 8-bit colour channels onto their own PWM range.
pub trait Indicator {
    /// Error type for the underlying outputs
    type Error;

    /// Show a colour
    fn set_color(&mut self, color: Rgb) -> Result<(), Self::Error>;

    /// Sound or silence the buzzer
    fn set_buzzer(&mut self, on: bool) -> Result<(), Self::Error>;
}
