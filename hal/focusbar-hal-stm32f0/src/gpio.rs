//! GPIO wrappers for STM32F0

use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Output;
use focusbar_hal::{EdgeLine, InputPin, OutputPin};

/// Push-pull output driving an LED
pub struct Led<'d>(Output<'d>);

impl<'d> Led<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for Led<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Active-low push button on an EXTI line
///
/// Embassy arms the EXTI line only while [`ButtonLine::wait_for_press`] is
/// pending and clears the pending bit in its own handler. The debouncer
/// runs between waits, so the line is already masked and clear while it
/// settles; the [`EdgeLine`] mask and clear operations have nothing left
/// to do.
pub struct ButtonLine<'d> {
    input: ExtiInput<'d>,
}

impl<'d> ButtonLine<'d> {
    pub fn new(input: ExtiInput<'d>) -> Self {
        Self { input }
    }

    /// Wait for the next falling edge
    pub async fn wait_for_press(&mut self) {
        self.input.wait_for_falling_edge().await;
    }
}

impl InputPin for ButtonLine<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

impl EdgeLine for ButtonLine<'_> {
    fn disable_interrupt(&mut self) {}

    fn enable_interrupt(&mut self) {}

    fn clear_pending(&mut self) {}
}
