//! RGB indicator LED and buzzer on PWM channels
//!
//! Three channels drive the LED colour; a fourth drives a passive buzzer
//! at half duty. Colour channels are 8-bit and scaled onto whatever duty
//! range each PWM channel reports.

use embedded_hal::pwm::SetDutyCycle;
use focusbar_core::indicator::{buzzer_duty, scale_channel, Rgb};
use focusbar_core::traits::Indicator;

/// PWM channel that rejected a duty write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    Red,
    Green,
    Blue,
    Buzzer,
}

/// RGB LED plus buzzer driver
pub struct RgbBuzzer<R, G, B, Z> {
    red: R,
    green: G,
    blue: B,
    buzzer: Z,
    color: Rgb,
    buzzing: bool,
}

impl<R, G, B, Z> RgbBuzzer<R, G, B, Z>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
    Z: SetDutyCycle,
{
    /// Wrap four PWM channels
    ///
    /// Outputs are not touched until the first `set_color`/`set_buzzer`.
    pub fn new(red: R, green: G, blue: B, buzzer: Z) -> Self {
        Self {
            red,
            green,
            blue,
            buzzer,
            color: Rgb::OFF,
            buzzing: false,
        }
    }

    /// Last colour written
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Whether the buzzer was last switched on
    pub fn is_buzzing(&self) -> bool {
        self.buzzing
    }

    /// Give the channels back
    pub fn release(self) -> (R, G, B, Z) {
        (self.red, self.green, self.blue, self.buzzer)
    }
}

fn write_channel<P: SetDutyCycle>(pwm: &mut P, value: u8, err: PwmError) -> Result<(), PwmError> {
    let duty = scale_channel(value, pwm.max_duty_cycle());
    pwm.set_duty_cycle(duty).map_err(|_| err)
}

impl<R, G, B, Z> Indicator for RgbBuzzer<R, G, B, Z>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
    Z: SetDutyCycle,
{
    type Error = PwmError;

    fn set_color(&mut self, color: Rgb) -> Result<(), PwmError> {
        write_channel(&mut self.red, color.r, PwmError::Red)?;
        write_channel(&mut self.green, color.g, PwmError::Green)?;
        write_channel(&mut self.blue, color.b, PwmError::Blue)?;
        self.color = color;
        Ok(())
    }

    fn set_buzzer(&mut self, on: bool) -> Result<(), PwmError> {
        let duty = buzzer_duty(on, self.buzzer.max_duty_cycle());
        self.buzzer
            .set_duty_cycle(duty)
            .map_err(|_| PwmError::Buzzer)?;
        self.buzzing = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::{ErrorKind, ErrorType};
    use proptest::prelude::*;

    /// PWM channel recording every duty written
    struct MockPwm {
        max: u16,
        duty: u16,
        writes: u32,
    }

    impl MockPwm {
        fn new(max: u16) -> Self {
            Self {
                max,
                duty: 0,
                writes: 0,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            assert!(duty <= self.max);
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    /// Channel that always fails
    struct BrokenPwm;

    impl ErrorType for BrokenPwm {
        type Error = ErrorKind;
    }

    impl SetDutyCycle for BrokenPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    fn driver(max: u16) -> RgbBuzzer<MockPwm, MockPwm, MockPwm, MockPwm> {
        RgbBuzzer::new(
            MockPwm::new(max),
            MockPwm::new(max),
            MockPwm::new(max),
            MockPwm::new(max),
        )
    }

    #[test]
    fn test_color_scaled_to_duty() {
        let mut rgb = driver(1000);
        rgb.set_color(Rgb::new(196, 62, 29)).unwrap();

        let (r, g, b, z) = rgb.release();
        assert_eq!(r.duty, 768);
        assert_eq!(g.duty, 243);
        assert_eq!(b.duty, 113);
        assert_eq!(z.writes, 0);
    }

    #[test]
    fn test_buzzer_half_duty() {
        let mut rgb = driver(1000);
        rgb.set_buzzer(true).unwrap();
        assert!(rgb.is_buzzing());
        rgb.set_buzzer(false).unwrap();

        let (_, _, _, z) = rgb.release();
        assert_eq!(z.duty, 0);
        assert_eq!(z.writes, 2);
    }

    #[test]
    fn test_reapply_is_idempotent() {
        let mut rgb = driver(4800);
        rgb.set_color(Rgb::new(40, 200, 60)).unwrap();
        let first = rgb.release();

        let mut rgb = RgbBuzzer::new(first.0, first.1, first.2, first.3);
        rgb.set_color(Rgb::new(40, 200, 60)).unwrap();
        rgb.set_color(Rgb::new(40, 200, 60)).unwrap();
        let (r, g, b, _) = rgb.release();
        assert_eq!((r.duty, g.duty, b.duty), (752, 3764, 1129));
    }

    #[test]
    fn test_channel_error_reported() {
        let mut rgb = RgbBuzzer::new(
            MockPwm::new(1000),
            BrokenPwm,
            MockPwm::new(1000),
            BrokenPwm,
        );
        assert_eq!(rgb.set_color(Rgb::new(1, 2, 3)), Err(PwmError::Green));
        assert_eq!(rgb.color(), Rgb::OFF);
        assert_eq!(rgb.set_buzzer(true), Err(PwmError::Buzzer));
        assert!(!rgb.is_buzzing());
    }

    proptest! {
        #[test]
        fn prop_duty_never_exceeds_max(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), max in 1u16..) {
            let mut rgb = driver(max);
            rgb.set_color(Rgb::new(r, g, b)).unwrap();
            rgb.set_buzzer(true).unwrap();
            let (r_pwm, _, _, z) = rgb.release();
            prop_assert_eq!(r_pwm.duty, (r as u32 * max as u32 / 255) as u16);
            prop_assert_eq!(z.duty, max / 2);
        }
    }
}
