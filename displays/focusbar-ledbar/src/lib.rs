//! LED bar side of the Focusbar link
//!
//! This crate provides:
//! - `SegmentBank` trait and a GPIO implementation for the 8 segments
//! - `LedBar`, the I2C target handler that renders each received level
//! - `EventQueue`, an `I2cTarget` fed from an async bus driver
//! - `Heartbeat`, the once-per-second status LED
//!
//! # Architecture
//!
//! The LED bar firmware owns the I2C peripheral in target mode. Every
//! event it sees is pushed through [`LedBar::on_event`]; received bytes
//! are rendered immediately, so the bar always shows the last byte the
//! controller wrote.

#![no_std]
#![deny(unsafe_code)]

pub mod bar;
pub mod heartbeat;
pub mod slave;

// Re-export key types
pub use bar::{GpioSegments, SegmentBank};
pub use heartbeat::Heartbeat;
pub use slave::{EventQueue, LedBar, TargetAction};
