//! Build-time configuration
//!
//! `build.rs` validates focusbar.toml and generates the constants included
//! below; everything not in the file keeps its `focusbar-core` default.

use focusbar_core::config::Config;
use focusbar_core::cycle::CycleConfig;
use focusbar_core::indicator::Palette;
use embassy_time::Duration;

include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// Longest wait for an echo before the reading is abandoned
///
/// Two trigger periods: a sensor that stays silent this long is
/// disconnected or out of range.
pub const ECHO_TIMEOUT: Duration = Duration::from_millis(60);

/// Controller configuration from focusbar.toml
pub fn load() -> Config {
    Config {
        cycle: CycleConfig {
            focus_s: FOCUS_S,
            break_s: BREAK_S,
            palette: Palette::DEFAULT,
        },
        ticks_per_second: TICKS_PER_SECOND,
        presence_threshold_cm: PRESENCE_THRESHOLD_CM,
        ..Config::default()
    }
}
