//! Time base task
//!
//! Ticks the time base at `ticks_per_second`; once per second it bumps the
//! elapsed counter, raises the heartbeat flag and toggles the status LED.

use defmt::*;
use embassy_time::{Duration, Ticker};
use focusbar_core::time::TimeBase;
use focusbar_hal::OutputPin;
use focusbar_hal_stm32f0::Led;

use crate::channels::SHARED;

#[embassy_executor::task]
pub async fn tick_task(mut time: TimeBase, mut led: Led<'static>) {
    info!(
        "Tick task started ({} ticks/s)",
        time.ticks_per_second()
    );

    let mut ticker = Ticker::every(Duration::from_micros(time.tick_period_us() as u64));

    loop {
        ticker.next().await;

        if let Some(beat) = SHARED.on_tick(&mut time) {
            led.set_state(beat.led_on);
        }
    }
}
