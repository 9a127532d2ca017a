//! Event tasks
//!
//! These run on the high-priority interrupt executor and stand in for the
//! timer, echo and button interrupt handlers. They never wait on the main
//! loop; everything they produce goes through [`crate::channels::SHARED`].

pub mod button;
pub mod echo;
pub mod tick;

pub use button::button_task;
pub use echo::echo_task;
pub use tick::tick_task;
