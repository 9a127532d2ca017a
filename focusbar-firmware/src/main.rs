//! Focusbar - Desk Focus Timer Firmware
//!
//! Controller firmware for STM32F042K6. Runs a Pomodoro-style work cycle
//! on an RGB LED, sounds a buzzer in overtime while someone is at the
//! desk, and streams the elapsed fraction of each period to the LED bar
//! over I2C.
//!
//! Event work (time base, echo captures, button) runs on a high-priority
//! interrupt executor. The main loop runs on the reset stack below it and
//! is free to busy-wait on the range finder and the bus.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Level, Output, OutputType, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::peripherals::TIM3;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::input_capture::{CapturePin, InputCapture};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::{self, Channel};
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use focusbar_core::button::Debouncer;
use focusbar_core::config::Config;
use focusbar_core::controller::{Controller, LinkOutcome};
use focusbar_core::ranging::measure_pulse_width_until;
use focusbar_core::time::TimeBase;
use focusbar_drivers::{LinkMaster, RgbBuzzer};
use focusbar_hal::i2c::I2cConfig;
use focusbar_hal_stm32f0::capture::CAPTURE_TICK_HZ;
use focusbar_hal_stm32f0::{i2c, ButtonLine, EchoCapture, Led};

use crate::channels::SHARED;
use crate::config::ECHO_TIMEOUT;

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    EXTI0_1 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI0_1>;
    TIM3 => timer::CaptureCompareInterruptHandler<TIM3>;
});

/// Executor standing in for the event interrupt handlers
static EVENT_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn USART1() {
    EVENT_EXECUTOR.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Focusbar firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let config = config::load();
    if let Err(e) = config.validate() {
        // build.rs rejects these values, so this only trips on edited defaults
        error!("Invalid configuration: {:?}", e);
    }
    info!(
        "Cycle: focus {}s, break {}s, presence < {}cm",
        config.cycle.focus_s, config.cycle.break_s, config.presence_threshold_cm
    );

    // RGB LED + buzzer on TIM2 (PA0=R, PA1=G, PA2=B, PA3=buzzer)
    let pwm = SimplePwm::new(
        p.TIM2,
        Some(PwmPin::new(p.PA0, OutputType::PushPull)),
        Some(PwmPin::new(p.PA1, OutputType::PushPull)),
        Some(PwmPin::new(p.PA2, OutputType::PushPull)),
        Some(PwmPin::new(p.PA3, OutputType::PushPull)),
        Hertz(config.pwm_frequency_hz),
        Default::default(),
    );
    let mut channels = pwm.split();
    channels.ch1.enable();
    channels.ch2.enable();
    channels.ch3.enable();
    channels.ch4.enable();
    let mut indicator = RgbBuzzer::new(channels.ch1, channels.ch2, channels.ch3, channels.ch4);

    // Timers: TIM1 time driver, TIM2 indicator, TIM16 trigger, TIM3 echo

    // Range finder trigger on TIM16 (PA6), free running
    let mut trigger = SimplePwm::new(
        p.TIM16,
        Some(PwmPin::new(p.PA6, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(config.trigger.frequency_hz()),
        Default::default(),
    );
    let trigger_duty = config.trigger.duty_for(trigger.max_duty_cycle().try_into().unwrap());
    let mut trigger_ch = trigger.ch1();
    trigger_ch.set_duty_cycle(trigger_duty.into());
    trigger_ch.enable();
    info!("Trigger: {}Hz, duty {}", config.trigger.frequency_hz(), trigger_duty);

    // Echo on TIM3_CH2 (PA7), both edges captured at 1 MHz
    let echo = EchoCapture::new(
        InputCapture::new(
            p.TIM3,
            None,
            Some(CapturePin::new(p.PA7, Pull::None)),
            None,
            None,
            Irqs,
            Hertz(CAPTURE_TICK_HZ),
            CountingMode::EdgeAlignedUp,
        ),
        Channel::Ch2,
    );

    // Link master on I2C1 (PB6=SCL, PB7=SDA), blocking writes
    let bus = I2c::new_blocking(
        p.I2C1,
        p.PB6,
        p.PB7,
        i2c::embassy_config(I2cConfig::STANDARD),
    );
    let mut link = LinkMaster::new(bus);

    // Event sources
    let button = ButtonLine::new(ExtiInput::new(p.PB1, p.EXTI1, Pull::Up, Irqs));
    let heartbeat = Led::new(Output::new(p.PB3, Level::Low, Speed::Low));

    interrupt::USART1.set_priority(Priority::P1);
    let spawner = EVENT_EXECUTOR.start(interrupt::USART1);
    spawner
        .spawn(tasks::tick_task(TimeBase::new(config.ticks_per_second), heartbeat))
        .unwrap();
    spawner
        .spawn(tasks::button_task(button, Debouncer::new(config.debounce_settle_us)))
        .unwrap();
    spawner.spawn(tasks::echo_task(echo)).unwrap();
    info!("Event tasks spawned");

    run(&config, &mut indicator, &mut link)
}

/// Application main loop
fn run<I, L>(config: &Config, indicator: &mut I, link: &mut L) -> !
where
    I: focusbar_core::traits::Indicator,
    I::Error: Format,
    L: focusbar_core::traits::LevelLink,
    L::Error: Format,
{
    let mut controller = Controller::new(config);
    if let Err(e) = controller.boot(indicator) {
        warn!("Indicator error at boot: {:?}", e);
    }
    info!("Ready in {:?}", controller.state());

    loop {
        let deadline = Instant::now() + ECHO_TIMEOUT;
        match measure_pulse_width_until(&SHARED.echo, || Instant::now() >= deadline) {
            Ok(ticks) => {
                let presence = controller.record_echo(ticks);
                trace!("Echo {} ticks: {:?}", ticks, presence);
            }
            Err(e) => {
                controller.echo_lost();
                debug!("Range finder: {:?}", e);
            }
        }

        match controller.poll(&SHARED, indicator, link) {
            Ok(report) => {
                if let Some((from, to)) = report.transition {
                    info!("{:?} -> {:?}", from, to);
                }
                match report.link {
                    LinkOutcome::Idle => {}
                    LinkOutcome::Sent(level) => debug!("Level {} sent", level.value()),
                    LinkOutcome::Failed(level, e) => {
                        warn!("Level {} dropped: {:?}", level.value(), e)
                    }
                }
            }
            Err(e) => warn!("Indicator error: {:?}", e),
        }
    }
}
