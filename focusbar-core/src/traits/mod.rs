//! Hardware abstraction traits
//!
//! These traits define the interface between the work-cycle logic and
//! the drivers that put its output on real pins and buses.

pub mod indicator;
pub mod link;

pub use indicator::Indicator;
pub use link::LevelLink;
