//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in focusbar-core on top of `embedded-hal` 1.0:
//!
//! - RGB indicator LED plus buzzer on four PWM channels
//! - I2C link master sending the bar level to the LED bar

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod rgb;

pub use link::{LinkError, LinkMaster};
pub use rgb::{PwmError, RgbBuzzer};
