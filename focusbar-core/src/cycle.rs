//! Work-cycle execution
//!
//! Wraps [`WorkState`] with the per-state behaviour: colour on every
//! transition, a proportional bar level every second while timing, and a
//! blinking alert in overtime. Outputs are returned as [`Effect`]s so the
//! caller decides how to apply them.

use heapless::Vec;

use crate::config::{DEFAULT_BREAK_S, DEFAULT_FOCUS_S};
use crate::indicator::{Palette, Rgb};
use crate::ranging::Presence;
use crate::state::{Event, WorkState};
use crate::sync::{LevelMailbox, SecondsCounter};
use focusbar_protocol::Level;

/// Maximum effects produced by one call
pub const MAX_EFFECTS: usize = 4;

/// Effects produced by one call
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Work-cycle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleConfig {
    /// Focus period in seconds
    pub focus_s: u32,
    /// Break period in seconds
    pub break_s: u32,
    /// Indicator colours
    pub palette: Palette,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            focus_s: DEFAULT_FOCUS_S,
            break_s: DEFAULT_BREAK_S,
            palette: Palette::DEFAULT,
        }
    }
}

impl CycleConfig {
    /// Configured duration of a timed state
    pub fn duration_for(&self, state: WorkState) -> Option<u32> {
        match state {
            WorkState::Focus => Some(self.focus_s),
            WorkState::Break => Some(self.break_s),
            WorkState::Idle | WorkState::Overtime => None,
        }
    }
}

/// Output requested by the work cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// State changed
    Transition { from: WorkState, to: WorkState },
    /// Apply an indicator colour
    SetColor(Rgb),
    /// Switch the buzzer
    SetBuzzer(bool),
    /// A new bar level was published to the mailbox
    PublishLevel(Level),
}

/// Work-cycle state plus per-state behaviour
#[derive(Debug, Clone)]
pub struct WorkCycle {
    state: WorkState,
    config: CycleConfig,
    blink_on: bool,
}

impl WorkCycle {
    pub fn new(config: CycleConfig) -> Self {
        Self {
            state: WorkState::Idle,
            config,
            blink_on: false,
        }
    }

    pub fn state(&self) -> WorkState {
        self.state
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Outputs for the boot state
    pub fn boot(&self) -> Effects {
        let mut effects = Effects::new();
        let _ = effects.push(Effect::SetColor(self.config.palette.color_for(self.state)));
        let _ = effects.push(Effect::SetBuzzer(false));
        effects
    }

    /// Handle a confirmed button press
    pub fn press(&mut self, elapsed: &SecondsCounter) -> Effects {
        let mut effects = Effects::new();
        self.apply(Event::Press, elapsed, &mut effects);
        effects
    }

    /// Handle a one-second heartbeat
    ///
    /// `elapsed` has already been advanced by the time base. Timed states
    /// either expire or publish a new bar level to `pending`; overtime
    /// flips the alert colour and sounds the buzzer on the bright phase
    /// while someone is at the desk.
    pub fn heartbeat(
        &mut self,
        elapsed: &SecondsCounter,
        pending: &LevelMailbox,
        presence: Presence,
    ) -> Effects {
        let mut effects = Effects::new();

        match self.state {
            WorkState::Focus | WorkState::Break => {
                let secs = elapsed.get();
                let duration = self.config.duration_for(self.state).unwrap_or(0);
                // The expiring second still publishes, so the bar reaches full
                let level = Level::proportional(secs, duration);
                pending.publish(level);
                let _ = effects.push(Effect::PublishLevel(level));
                if secs >= duration {
                    self.apply(Event::TimeUp, elapsed, &mut effects);
                }
            }
            WorkState::Overtime => {
                self.blink_on = !self.blink_on;
                let color = self.config.palette.overtime_phase(self.blink_on);
                let _ = effects.push(Effect::SetColor(color));
                let _ = effects.push(Effect::SetBuzzer(self.blink_on && presence.is_present()));
            }
            WorkState::Idle => {}
        }

        effects
    }

    fn apply(&mut self, event: Event, elapsed: &SecondsCounter, effects: &mut Effects) {
        let next = self.state.transition(event);
        if next == self.state {
            return;
        }

        let from = self.state;
        self.state = next;
        self.blink_on = false;
        elapsed.reset();

        let _ = effects.push(Effect::Transition { from, to: next });
        let _ = effects.push(Effect::SetColor(self.config.palette.color_for(next)));
        let _ = effects.push(Effect::SetBuzzer(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cycle(focus_s: u32, break_s: u32) -> WorkCycle {
        WorkCycle::new(CycleConfig {
            focus_s,
            break_s,
            palette: Palette::DEFAULT,
        })
    }

    /// Advance one second the way the time base does
    fn second(cycle: &mut WorkCycle, elapsed: &SecondsCounter, pending: &LevelMailbox) -> Effects {
        elapsed.increment();
        cycle.heartbeat(elapsed, pending, Presence::Unknown)
    }

    #[test]
    fn test_boot_shows_idle_color() {
        let c = cycle(100, 50);
        assert_eq!(c.state(), WorkState::Idle);
        assert_eq!(c.boot()[0], Effect::SetColor(Palette::DEFAULT.idle));
    }

    #[test]
    fn test_press_resets_elapsed_and_sets_color() {
        let mut c = cycle(100, 50);
        let elapsed = SecondsCounter::new();
        for _ in 0..7 {
            elapsed.increment();
        }

        let effects = c.press(&elapsed);
        assert_eq!(c.state(), WorkState::Focus);
        assert_eq!(elapsed.get(), 0);
        assert_eq!(
            effects[0],
            Effect::Transition {
                from: WorkState::Idle,
                to: WorkState::Focus
            }
        );
        assert_eq!(effects[1], Effect::SetColor(Palette::DEFAULT.focus));
    }

    #[test]
    fn test_level_published_each_second() {
        let mut c = cycle(100, 50);
        let elapsed = SecondsCounter::new();
        let pending = LevelMailbox::new();
        c.press(&elapsed);

        for _ in 0..50 {
            second(&mut c, &elapsed, &pending);
        }
        assert_eq!(elapsed.get(), 50);
        assert_eq!(pending.take(), Some(Level::clamped(4)));
    }

    #[test]
    fn test_break_level_uses_break_duration() {
        let mut c = cycle(100, 16);
        let elapsed = SecondsCounter::new();
        let pending = LevelMailbox::new();
        c.press(&elapsed);
        c.press(&elapsed);
        assert_eq!(c.state(), WorkState::Break);

        for _ in 0..6 {
            second(&mut c, &elapsed, &pending);
        }
        assert_eq!(pending.take(), Some(Level::clamped(3)));
    }

    #[test]
    fn test_idle_has_no_periodic_output() {
        let mut c = cycle(100, 50);
        let elapsed = SecondsCounter::new();
        let pending = LevelMailbox::new();

        for _ in 0..10 {
            assert!(second(&mut c, &elapsed, &pending).is_empty());
        }
        assert!(!pending.is_dirty());
    }

    #[test]
    fn test_overtime_blinks_without_touching_level() {
        let mut c = cycle(2, 50);
        let elapsed = SecondsCounter::new();
        let pending = LevelMailbox::new();
        c.press(&elapsed);

        second(&mut c, &elapsed, &pending);
        assert_eq!(pending.take(), Some(Level::clamped(4)));

        let effects = second(&mut c, &elapsed, &pending);
        assert_eq!(c.state(), WorkState::Overtime);
        assert_eq!(effects[2], Effect::SetColor(Palette::DEFAULT.overtime));
        assert_eq!(pending.take(), Some(Level::FULL));

        let a = second(&mut c, &elapsed, &pending);
        let b = second(&mut c, &elapsed, &pending);
        let a2 = second(&mut c, &elapsed, &pending);
        assert_eq!(a[0], Effect::SetColor(Palette::DEFAULT.overtime_blink));
        assert_eq!(b[0], Effect::SetColor(Palette::DEFAULT.overtime));
        assert_eq!(a, a2);
        assert!(!pending.is_dirty());
    }

    #[test]
    fn test_expiring_second_publishes_full_level() {
        let mut c = cycle(8, 50);
        let elapsed = SecondsCounter::new();
        let pending = LevelMailbox::new();
        c.press(&elapsed);

        for _ in 1..8 {
            second(&mut c, &elapsed, &pending);
        }
        assert_eq!(pending.take(), Some(Level::clamped(7)));

        let effects = second(&mut c, &elapsed, &pending);
        assert_eq!(effects[0], Effect::PublishLevel(Level::FULL));
        assert_eq!(
            effects[1],
            Effect::Transition {
                from: WorkState::Focus,
                to: WorkState::Overtime
            }
        );
        assert_eq!(effects.len(), MAX_EFFECTS);
        assert_eq!(pending.take(), Some(Level::FULL));
    }

    #[test]
    fn test_overtime_buzzer_needs_presence() {
        let mut c = cycle(1, 50);
        let elapsed = SecondsCounter::new();
        let pending = LevelMailbox::new();
        c.press(&elapsed);
        second(&mut c, &elapsed, &pending);
        assert_eq!(c.state(), WorkState::Overtime);

        elapsed.increment();
        let absent = c.heartbeat(&elapsed, &pending, Presence::Absent);
        assert_eq!(absent[1], Effect::SetBuzzer(false));

        elapsed.increment();
        c.heartbeat(&elapsed, &pending, Presence::Present);
        elapsed.increment();
        let present = c.heartbeat(&elapsed, &pending, Presence::Present);
        assert_eq!(present[1], Effect::SetBuzzer(true));
    }

    #[test]
    fn test_overtime_press_to_idle() {
        let mut c = cycle(1, 50);
        let elapsed = SecondsCounter::new();
        let pending = LevelMailbox::new();
        c.press(&elapsed);
        second(&mut c, &elapsed, &pending);
        second(&mut c, &elapsed, &pending);

        let effects = c.press(&elapsed);
        assert_eq!(c.state(), WorkState::Idle);
        assert_eq!(elapsed.get(), 0);
        assert!(effects.contains(&Effect::SetColor(Palette::DEFAULT.idle)));
        assert!(effects.contains(&Effect::SetBuzzer(false)));
    }

    proptest! {
        #[test]
        fn prop_focus_expires_exactly_at_duration(duration in 1u32..400) {
            let mut c = cycle(duration, 50);
            let elapsed = SecondsCounter::new();
            let pending = LevelMailbox::new();
            c.press(&elapsed);

            for _ in 1..duration {
                second(&mut c, &elapsed, &pending);
                prop_assert_eq!(c.state(), WorkState::Focus);
            }
            second(&mut c, &elapsed, &pending);
            prop_assert_eq!(c.state(), WorkState::Overtime);
            prop_assert_eq!(elapsed.get(), 0);
        }

        #[test]
        fn prop_break_expires_exactly_at_duration(duration in 1u32..400) {
            let mut c = cycle(50, duration);
            let elapsed = SecondsCounter::new();
            let pending = LevelMailbox::new();
            c.press(&elapsed);
            c.press(&elapsed);

            for _ in 1..duration {
                second(&mut c, &elapsed, &pending);
                prop_assert_eq!(c.state(), WorkState::Break);
            }
            second(&mut c, &elapsed, &pending);
            prop_assert_eq!(c.state(), WorkState::Overtime);
        }

        #[test]
        fn prop_published_level_in_range(duration in 1u32..10_000, secs in 1u32..10_000) {
            let mut c = cycle(duration.max(secs + 1), 50);
            let elapsed = SecondsCounter::new();
            let pending = LevelMailbox::new();
            c.press(&elapsed);
            for _ in 0..secs {
                elapsed.increment();
            }
            c.heartbeat(&elapsed, &pending, Presence::Unknown);
            let level = pending.take().unwrap();
            prop_assert!(level.value() <= 8);
        }
    }
}
