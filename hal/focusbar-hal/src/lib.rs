//! Focusbar Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the Focusbar logic
//! crates are written against. `focusbar-hal-stm32f0` implements them on
//! top of embassy-stm32; host tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  focusbar-firmware / focusbar-ledbar-fw      │
//! └──────────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────────┐
//! │ focusbar-core │       │ focusbar-ledbar   │
//! └───────────────┘       └───────────────────┘
//!         │                       │
//!         └───────────┬───────────┘
//!                     ▼
//! ┌──────────────────────────────────────────────┐
//! │  focusbar-hal (this crate - traits)          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`irq::EdgeLine`] - Edge-triggered input with a maskable interrupt
//! - [`i2c::I2cTarget`] - I2C target (slave) event source

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod irq;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cTarget, TargetEvent};
pub use irq::EdgeLine;
