//! Events that trigger work-cycle transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Confirmed button press
    Press,
    /// Time in the current phase reached its configured duration
    TimeUp,
}
