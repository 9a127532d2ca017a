//! Focusbar LED Bar Link Protocol
//!
//! This crate defines the single-byte I2C protocol between the controller
//! (bus master) and the LED bar (bus target).
//!
//! # Protocol Overview
//!
//! Every transaction is one write of one byte to a fixed 7-bit address:
//! ```text
//! ┌───────┬──────────┬─────┬───────┬──────┐
//! │ START │ ADDR + W │ ACK │ LEVEL │ STOP │
//! │       │ 0x42     │     │ 0..=8 │      │
//! └───────┴──────────┴─────┴───────┴──────┘
//! ```
//!
//! LEVEL is the number of lit segments. There is no framing, no checksum
//! and no reply; the byte itself is the whole message.

#![no_std]
#![deny(unsafe_code)]

pub mod level;
pub mod segments;

pub use level::{Level, MAX_LEVEL};
pub use segments::{SegmentPattern, SEGMENT_COUNT};

/// 7-bit I2C address of the LED bar
pub const LEDBAR_ADDRESS: u8 = 0x42;
