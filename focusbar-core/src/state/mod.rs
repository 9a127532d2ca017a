//! Work-cycle state machine
//!
//! Defines the authoritative phase of the focus timer.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::WorkState;
