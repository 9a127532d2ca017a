//! STM32F0-specific glue for the Focusbar firmware
//!
//! Newtypes over embassy-stm32 peripherals that implement the
//! `focusbar-hal` traits, the echo capture channel, and configuration and
//! error converters shared by both firmware binaries.
//!
//! # Features
//!
//! - `stm32f042k6` - Enable support for STM32F042K6 (controller and LED bar)
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod capture;
pub mod gpio;
pub mod i2c;

pub use capture::EchoCapture;
pub use gpio::{ButtonLine, Led};
