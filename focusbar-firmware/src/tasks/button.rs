//! Button task
//!
//! Runs the debouncer on every falling edge. The settle delay is a
//! blocking busy-wait: the line stays masked for its duration. Echo counts
//! are latched by the capture timer meanwhile, so only their delivery
//! waits.

use defmt::*;
use embassy_time::Delay;
use focusbar_core::button::Debouncer;
use focusbar_hal_stm32f0::ButtonLine;

use crate::channels::SHARED;

#[embassy_executor::task]
pub async fn button_task(mut line: ButtonLine<'static>, mut debouncer: Debouncer) {
    info!("Button task started");

    let mut delay = Delay;

    loop {
        line.wait_for_press().await;

        if debouncer.on_falling_edge(&mut line, &mut delay, &SHARED.button) {
            debug!("Button: press");
        } else {
            trace!("Button: bounce rejected");
        }
    }
}
