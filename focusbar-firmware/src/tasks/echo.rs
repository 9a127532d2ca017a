//! Echo capture task
//!
//! Alternates the capture channel between rising and falling edges of the
//! range finder's echo and feeds the latched counts to the capture state
//! machine.

use defmt::*;
use embassy_stm32::peripherals::TIM3;
use focusbar_core::ranging::{Capture, Edge};
use focusbar_hal_stm32f0::EchoCapture;

use crate::channels::SHARED;

#[embassy_executor::task]
pub async fn echo_task(mut echo: EchoCapture<'static, TIM3>) {
    info!("Echo task started");

    let mut capture = Capture::new();
    capture.arm();

    loop {
        let start = echo.rising_edge().await;
        capture.on_edge(Edge::Rising, start, &SHARED.echo);

        let end = echo.falling_edge().await;
        capture.on_edge(Edge::Falling, end, &SHARED.echo);
    }
}
