//! Main-loop controller
//!
//! [`Shared`] holds every cell written from handler context. The main loop
//! calls [`Controller::poll`] repeatedly; each call consumes the pending
//! button press, heartbeat and bar level, applies the resulting effects to
//! the indicator and forwards the level over the link.

use crate::config::Config;
use crate::cycle::{Effect, Effects, WorkCycle};
use crate::ranging::{ticks_to_cm, Presence};
use crate::state::WorkState;
use crate::sync::{CaptureCell, Flag, LevelMailbox, SecondsCounter};
use crate::time::{Heartbeat, TimeBase};
use crate::traits::{Indicator, LevelLink};
use focusbar_protocol::Level;

/// Cells shared between handler context and the main loop
#[derive(Debug, Default)]
pub struct Shared {
    /// Seconds in the current state
    pub elapsed: SecondsCounter,
    /// Raised once per second by the time base
    pub heartbeat: Flag,
    /// Raised by the debouncer on a confirmed press
    pub button: Flag,
    /// Latest bar level not yet sent
    pub level: LevelMailbox,
    /// Latest echo pulse
    pub echo: CaptureCell,
}

impl Shared {
    pub const fn new() -> Self {
        Self {
            elapsed: SecondsCounter::new(),
            heartbeat: Flag::new(),
            button: Flag::new(),
            level: LevelMailbox::new(),
            echo: CaptureCell::new(),
        }
    }

    /// Timer tick glue
    ///
    /// Advances `time`; on each second bumps the elapsed counter and
    /// raises the heartbeat flag. Returns the heartbeat so the caller can
    /// drive the status LED.
    pub fn on_tick(&self, time: &mut TimeBase) -> Option<Heartbeat> {
        let beat = time.on_tick()?;
        self.elapsed.increment();
        self.heartbeat.raise();
        Some(beat)
    }
}

/// Result of the link step in one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkOutcome<E> {
    /// No level was pending
    Idle,
    /// Level delivered
    Sent(Level),
    /// Level dropped after a failed transfer
    Failed(Level, E),
}

/// What happened during one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report<E> {
    /// Last state change, if any
    pub transition: Option<(WorkState, WorkState)>,
    /// Link step result
    pub link: LinkOutcome<E>,
}

/// Work-cycle driver for the main loop
pub struct Controller {
    cycle: WorkCycle,
    presence: Presence,
    presence_threshold_cm: u16,
}

impl Controller {
    pub fn new(config: &Config) -> Self {
        Self {
            cycle: WorkCycle::new(config.cycle),
            presence: Presence::Unknown,
            presence_threshold_cm: config.presence_threshold_cm,
        }
    }

    pub fn state(&self) -> WorkState {
        self.cycle.state()
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Show the boot colour
    pub fn boot<I: Indicator>(&mut self, indicator: &mut I) -> Result<(), I::Error> {
        let effects = self.cycle.boot();
        apply(&effects, indicator).map(|_| ())
    }

    /// Record a range measurement in timer ticks
    pub fn record_echo(&mut self, ticks: u16) -> Presence {
        self.presence = Presence::from_distance(ticks_to_cm(ticks), self.presence_threshold_cm);
        self.presence
    }

    /// Forget presence after a failed measurement
    pub fn echo_lost(&mut self) {
        self.presence = Presence::Unknown;
    }

    /// Run one main-loop iteration
    ///
    /// Indicator errors abort the iteration. Link errors are reported in
    /// the returned [`Report`] and the level is dropped.
    pub fn poll<I, L>(
        &mut self,
        shared: &Shared,
        indicator: &mut I,
        link: &mut L,
    ) -> Result<Report<L::Error>, I::Error>
    where
        I: Indicator,
        L: LevelLink,
    {
        let mut transition = None;

        if shared.button.take() {
            let effects = self.cycle.press(&shared.elapsed);
            transition = apply(&effects, indicator)?.or(transition);
        }

        if shared.heartbeat.take() {
            let effects = self
                .cycle
                .heartbeat(&shared.elapsed, &shared.level, self.presence);
            transition = apply(&effects, indicator)?.or(transition);
        }

        let link = match shared.level.take() {
            None => LinkOutcome::Idle,
            Some(level) => match link.send_level(level) {
                Ok(()) => LinkOutcome::Sent(level),
                Err(e) => LinkOutcome::Failed(level, e),
            },
        };

        Ok(Report { transition, link })
    }
}

fn apply<I: Indicator>(
    effects: &Effects,
    indicator: &mut I,
) -> Result<Option<(WorkState, WorkState)>, I::Error> {
    let mut transition = None;
    for effect in effects {
        match *effect {
            Effect::SetColor(color) => indicator.set_color(color)?,
            Effect::SetBuzzer(on) => indicator.set_buzzer(on)?,
            Effect::Transition { from, to } => transition = Some((from, to)),
            Effect::PublishLevel(_) => {}
        }
    }
    Ok(transition)
}
