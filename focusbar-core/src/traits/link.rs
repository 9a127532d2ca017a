//! Bar-level link trait

use focusbar_protocol::Level;

/// Trait for the link that carries the bar level to the LED bar
pub trait LevelLink {
    /// Transfer error
    type Error;

    /// Send one level
    ///
    /// A failed send is reported once and not retried; the next
    /// heartbeat publishes a fresh level anyway.
    fn send_level(&mut self, level: Level) -> Result<(), Self::Error>;
}
