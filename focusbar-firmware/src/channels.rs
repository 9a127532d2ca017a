//! State shared between the event tasks and the main loop
//!
//! Every cell is single-writer/single-reader and lock-free, so the
//! high-priority event tasks can preempt the main loop at any point.

use focusbar_core::controller::Shared;

/// Cells written by the event tasks, consumed by the main loop
pub static SHARED: Shared = Shared::new();
