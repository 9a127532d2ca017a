//! Indicator colours and PWM scaling

use crate::state::WorkState;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// LED off
    pub const OFF: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Scale an 8-bit channel onto a PWM duty range
///
/// `duty = value * max_duty / 255`, computed in 32 bits.
pub const fn scale_channel(value: u8, max_duty: u16) -> u16 {
    ((value as u32 * max_duty as u32) / 255) as u16
}

/// Buzzer duty: half the range when sounding
pub const fn buzzer_duty(on: bool, max_duty: u16) -> u16 {
    if on {
        max_duty / 2
    } else {
        0
    }
}

/// One colour per work state, plus the second overtime blink colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    pub idle: Rgb,
    pub focus: Rgb,
    pub rest: Rgb,
    pub overtime: Rgb,
    /// Alternates with `overtime` every second while in overtime
    pub overtime_blink: Rgb,
}

impl Palette {
    pub const DEFAULT: Self = Self {
        idle: Rgb::new(255, 180, 100),
        focus: Rgb::new(196, 62, 29),
        rest: Rgb::new(40, 200, 60),
        overtime: Rgb::new(255, 140, 0),
        overtime_blink: Rgb::new(196, 62, 29),
    };

    /// Steady colour shown on entering `state`
    pub const fn color_for(&self, state: WorkState) -> Rgb {
        match state {
            WorkState::Idle => self.idle,
            WorkState::Focus => self.focus,
            WorkState::Break => self.rest,
            WorkState::Overtime => self.overtime,
        }
    }

    /// Overtime blink colour for the given phase
    pub const fn overtime_phase(&self, blink_on: bool) -> Rgb {
        if blink_on {
            self.overtime_blink
        } else {
            self.overtime
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
