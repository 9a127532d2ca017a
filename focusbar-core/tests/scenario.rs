//! Full work cycle driven through the controller, as the firmware runs it

use focusbar_core::config::Config;
use focusbar_core::controller::{Controller, LinkOutcome, Shared};
use focusbar_core::cycle::CycleConfig;
use focusbar_core::indicator::{Palette, Rgb};
use focusbar_core::state::WorkState;
use focusbar_core::time::TimeBase;
use focusbar_core::traits::{Indicator, LevelLink};
use focusbar_core::Level;

const FOCUS_S: u32 = 16;
const BREAK_S: u32 = 8;

#[derive(Default)]
struct Panel {
    colors: Vec<Rgb>,
    buzzer: bool,
}

impl Indicator for Panel {
    type Error = core::convert::Infallible;

    fn set_color(&mut self, color: Rgb) -> Result<(), Self::Error> {
        self.colors.push(color);
        Ok(())
    }

    fn set_buzzer(&mut self, on: bool) -> Result<(), Self::Error> {
        self.buzzer = on;
        Ok(())
    }
}

impl Panel {
    fn color(&self) -> Rgb {
        self.colors.last().copied().unwrap_or(Rgb::OFF)
    }
}

#[derive(Default)]
struct Bar {
    levels: Vec<Level>,
}

impl LevelLink for Bar {
    type Error = core::convert::Infallible;

    fn send_level(&mut self, level: Level) -> Result<(), Self::Error> {
        self.levels.push(level);
        Ok(())
    }
}

struct Rig {
    shared: Shared,
    time: TimeBase,
    controller: Controller,
    panel: Panel,
    bar: Bar,
}

impl Rig {
    fn new() -> Self {
        let config = Config {
            cycle: CycleConfig {
                focus_s: FOCUS_S,
                break_s: BREAK_S,
                palette: Palette::DEFAULT,
            },
            ..Config::default()
        };
        let time = TimeBase::new(config.ticks_per_second);
        let mut rig = Self {
            shared: Shared::new(),
            time,
            controller: Controller::new(&config),
            panel: Panel::default(),
            bar: Bar::default(),
        };
        rig.controller.boot(&mut rig.panel).unwrap();
        rig
    }

    fn poll(&mut self) -> Option<(WorkState, WorkState)> {
        let report = self
            .controller
            .poll(&self.shared, &mut self.panel, &mut self.bar)
            .unwrap();
        report.transition
    }

    fn press(&mut self) -> Option<(WorkState, WorkState)> {
        self.shared.button.raise();
        self.poll()
    }

    /// One second of timer ticks followed by a main-loop pass
    fn second(&mut self) -> Option<(WorkState, WorkState)> {
        for _ in 0..self.time.ticks_per_second() {
            self.shared.on_tick(&mut self.time);
        }
        self.poll()
    }
}

#[test]
fn boot_focus_overtime_idle() {
    let mut rig = Rig::new();
    assert_eq!(rig.controller.state(), WorkState::Idle);
    assert_eq!(rig.panel.color(), Palette::DEFAULT.idle);

    // Idle ignores time
    for _ in 0..5 {
        assert_eq!(rig.second(), None);
    }
    assert!(rig.bar.levels.is_empty());

    assert_eq!(rig.press(), Some((WorkState::Idle, WorkState::Focus)));
    assert_eq!(rig.panel.color(), Palette::DEFAULT.focus);
    assert_eq!(rig.shared.elapsed.get(), 0);

    for _ in 1..FOCUS_S {
        assert_eq!(rig.second(), None);
    }
    assert_eq!(rig.bar.levels.len(), FOCUS_S as usize - 1);
    assert_eq!(rig.bar.levels[7], Level::clamped(4));
    assert!(rig.bar.levels.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(rig.second(), Some((WorkState::Focus, WorkState::Overtime)));
    assert_eq!(rig.panel.color(), Palette::DEFAULT.overtime);
    assert_eq!(rig.bar.levels.last(), Some(&Level::FULL));

    let sent = rig.bar.levels.len();
    rig.second();
    assert_eq!(rig.panel.color(), Palette::DEFAULT.overtime_blink);
    rig.second();
    assert_eq!(rig.panel.color(), Palette::DEFAULT.overtime);
    rig.second();
    assert_eq!(rig.panel.color(), Palette::DEFAULT.overtime_blink);
    assert_eq!(rig.bar.levels.len(), sent);

    assert_eq!(rig.press(), Some((WorkState::Overtime, WorkState::Idle)));
    assert_eq!(rig.panel.color(), Palette::DEFAULT.idle);
    assert!(!rig.panel.buzzer);
}

#[test]
fn focus_break_alternation() {
    let mut rig = Rig::new();

    rig.press();
    rig.second();
    rig.second();
    assert_eq!(rig.press(), Some((WorkState::Focus, WorkState::Break)));
    assert_eq!(rig.panel.color(), Palette::DEFAULT.rest);
    assert_eq!(rig.shared.elapsed.get(), 0);

    for _ in 1..BREAK_S {
        assert_eq!(rig.second(), None);
    }
    assert_eq!(rig.second(), Some((WorkState::Break, WorkState::Overtime)));
}

#[test]
fn level_survives_skipped_passes() {
    let mut rig = Rig::new();
    rig.press();

    // Main loop busy for three seconds; only the newest level goes out
    for _ in 0..3 * rig.time.ticks_per_second() {
        rig.shared.on_tick(&mut rig.time);
    }
    let report = rig
        .controller
        .poll(&rig.shared, &mut rig.panel, &mut rig.bar)
        .unwrap();

    assert_eq!(report.link, LinkOutcome::Sent(Level::proportional(3, FOCUS_S)));
    assert_eq!(rig.bar.levels.len(), 1);
}

#[test]
fn focus_period_ends_on_a_full_bar() {
    let mut rig = Rig::new();
    rig.press();

    for _ in 0..FOCUS_S + 4 {
        rig.second();
    }
    assert_eq!(rig.controller.state(), WorkState::Overtime);

    let values: Vec<u8> = rig.bar.levels.iter().map(|l| l.value()).collect();
    assert_eq!(values.len(), FOCUS_S as usize);
    assert_eq!(values.last(), Some(&8));
    assert_eq!(values.iter().filter(|&&v| v == 8).count(), 1);
}
