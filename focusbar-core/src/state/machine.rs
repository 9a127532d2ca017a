//! State machine definition
//!
//! Colour, buzzer and bar output are all a function of the current state,
//! the seconds spent in it, and an event.

use super::events::Event;

/// Work-cycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkState {
    /// Not timing; waiting for the user to start
    #[default]
    Idle,
    /// Focus period running
    Focus,
    /// Break period running
    Break,
    /// A period ran out without a press; alerting
    Overtime,
}

impl WorkState {
    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use WorkState::*;

        match (self, event) {
            (Idle, Press) => Focus,

            (Focus, Press) => Break,
            (Focus, TimeUp) => Overtime,

            (Break, Press) => Focus,
            (Break, TimeUp) => Overtime,

            (Overtime, Press) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_state_is_idle() {
        assert_eq!(WorkState::default(), WorkState::Idle);
    }

    #[test]
    fn test_press_cycle() {
        let focus = WorkState::Idle.transition(Event::Press);
        assert_eq!(focus, WorkState::Focus);

        let rest = focus.transition(Event::Press);
        assert_eq!(rest, WorkState::Break);

        assert_eq!(rest.transition(Event::Press), WorkState::Focus);
    }

    #[test]
    fn test_time_up_goes_to_overtime() {
        assert_eq!(WorkState::Focus.transition(Event::TimeUp), WorkState::Overtime);
        assert_eq!(WorkState::Break.transition(Event::TimeUp), WorkState::Overtime);
    }

    #[test]
    fn test_time_up_ignored_when_untimed() {
        assert_eq!(WorkState::Idle.transition(Event::TimeUp), WorkState::Idle);
        assert_eq!(WorkState::Overtime.transition(Event::TimeUp), WorkState::Overtime);
    }

    #[test]
    fn test_overtime_press_returns_to_idle() {
        assert_eq!(WorkState::Overtime.transition(Event::Press), WorkState::Idle);
    }
}
