//! Board-agnostic core logic for the Focusbar firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Single-slot cells shared between event handlers and the main loop
//! - Time base (ticks to seconds and heartbeat)
//! - Range finder capture state machine and blocking measurement
//! - Button debouncer
//! - Work-cycle state machine and its effects
//! - Main-loop controller
//! - Configuration defaults

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod config;
pub mod controller;
pub mod cycle;
pub mod indicator;
pub mod ranging;
pub mod state;
pub mod sync;
pub mod time;
pub mod traits;

pub use focusbar_protocol::Level;
