//! Focusbar LED Bar Firmware
//!
//! Firmware for the 8-segment LED bar (STM32F042K6). Listens on I2C as a
//! target at the Focusbar address and lights one segment per eighth of
//! the current period. A status LED blinks once per second.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::{self, I2c, MultiMaster, SlaveAddrConfig, SlaveCommand, SlaveCommandKind};
use embassy_stm32::mode::Async;
use embassy_stm32::peripherals::I2C1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use focusbar_hal::i2c::I2cConfig;
use focusbar_hal_stm32f0::i2c as bus;
use focusbar_hal_stm32f0::Led;
use focusbar_ledbar::{EventQueue, GpioSegments, Heartbeat, LedBar};
use focusbar_protocol::LEDBAR_ADDRESS;

bind_interrupts!(struct Irqs {
    I2C1 => i2c::EventInterruptHandler<I2C1>, i2c::ErrorInterruptHandler<I2C1>;
});

/// Level on the bar, for the status log
static LEVEL_SHOWN: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Heartbeat interval
const HEARTBEAT_MS: u64 = 1000;

/// Events buffered per transaction
const EVENT_QUEUE_SIZE: usize = 8;

type Target = I2c<'static, Async, MultiMaster>;
type Bar = LedBar<GpioSegments<Led<'static>>>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Focusbar LED bar firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // Segments on PA0..PA7, segment 1 on PA0
    let segments = GpioSegments::new([
        Led::new(Output::new(p.PA0, Level::Low, Speed::Low)),
        Led::new(Output::new(p.PA1, Level::Low, Speed::Low)),
        Led::new(Output::new(p.PA2, Level::Low, Speed::Low)),
        Led::new(Output::new(p.PA3, Level::Low, Speed::Low)),
        Led::new(Output::new(p.PA4, Level::Low, Speed::Low)),
        Led::new(Output::new(p.PA5, Level::Low, Speed::Low)),
        Led::new(Output::new(p.PA6, Level::Low, Speed::Low)),
        Led::new(Output::new(p.PA7, Level::Low, Speed::Low)),
    ]);
    let bar = LedBar::new(segments);

    // I2C target on PB6=SCL, PB7=SDA
    let target = I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH2,
        p.DMA1_CH3,
        bus::embassy_config(I2cConfig::STANDARD),
    )
    .into_slave_multimaster(SlaveAddrConfig::basic(LEDBAR_ADDRESS));
    info!("Listening at {:#04x}", LEDBAR_ADDRESS);

    let heartbeat = Heartbeat::new(Led::new(Output::new(p.PB3, Level::Low, Speed::Low)));

    spawner.spawn(target_task(target, bar)).unwrap();
    spawner.spawn(heartbeat_task(heartbeat)).unwrap();

    info!("All tasks spawned");
}

/// I2C target task - renders every byte the controller writes
#[embassy_executor::task]
async fn target_task(mut target: Target, mut bar: Bar) {
    info!("Target task started");

    let mut events: EventQueue<EVENT_QUEUE_SIZE> = EventQueue::new();
    let mut buf = [0u8; EVENT_QUEUE_SIZE - 1];

    loop {
        match target.listen().await {
            Ok(SlaveCommand {
                kind: SlaveCommandKind::Write,
                ..
            }) => match target.respond_to_write(&mut buf).await {
                Ok(len) => {
                    events.push_write(&buf[..len]);
                }
                Err(e) => queue_error(&mut events, e),
            },
            Ok(SlaveCommand {
                kind: SlaveCommandKind::Read,
                ..
            }) => {
                // Read-back of the latched byte
                if let Err(e) = target.respond_to_read(&[bar.led_level()]).await {
                    queue_error(&mut events, e);
                }
            }
            Err(e) => queue_error(&mut events, e),
        }

        if bar.service(&mut events) > 0 {
            LEVEL_SHOWN.signal(bar.led_level());
        }
        if events.take_restart() {
            // This is the handshake retry: looping back into listen() re-arms
            // address matching and the controller's next start is
            // acknowledged afresh. The byte itself is never replayed.
            debug!("NACK, restarting handshake");
        }
    }
}

fn queue_error(events: &mut EventQueue<EVENT_QUEUE_SIZE>, error: i2c::Error) {
    match bus::target_event_for(error) {
        Some(event) => {
            let _ = events.push(event);
        }
        None => warn!("I2C target error: {:?}", error),
    }
}

/// Heartbeat task - blinks the status LED and logs the bar level
#[embassy_executor::task]
async fn heartbeat_task(mut heartbeat: Heartbeat<Led<'static>>) {
    info!("Heartbeat task started");

    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_MS));

    loop {
        ticker.next().await;
        heartbeat.on_second();

        if let Some(level) = LEVEL_SHOWN.try_take() {
            debug!("Bar at level {}", level);
        }
    }
}
