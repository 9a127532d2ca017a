//! Build script for focusbar-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates focusbar.toml and bakes it into `$OUT_DIR/config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// A validated integer setting
struct Setting {
    section: &'static str,
    key: &'static str,
    min: i64,
    max: i64,
    konst: &'static str,
    ty: &'static str,
}

const SETTINGS: &[Setting] = &[
    Setting {
        section: "cycle",
        key: "focus_s",
        min: 1,
        max: 86_400,
        konst: "FOCUS_S",
        ty: "u32",
    },
    Setting {
        section: "cycle",
        key: "break_s",
        min: 1,
        max: 86_400,
        konst: "BREAK_S",
        ty: "u32",
    },
    Setting {
        section: "ranging",
        key: "presence_threshold_cm",
        min: 2,
        max: 400,
        konst: "PRESENCE_THRESHOLD_CM",
        ty: "u16",
    },
    Setting {
        section: "timebase",
        key: "ticks_per_second",
        min: 1,
        max: 1_000,
        konst: "TICKS_PER_SECOND",
        ty: "u16",
    },
];

/// Validate focusbar.toml and write the generated constants
fn generate_config() {
    println!("cargo:rerun-if-changed=focusbar.toml");

    let config_path = Path::new("focusbar.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: focusbar.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a focusbar.toml configuration file.       ║\n\
            ║  Please create one in the focusbar-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read focusbar.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in focusbar.toml                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    let mut generated = String::from("// Generated from focusbar.toml by build.rs\n\n");

    for setting in SETTINGS {
        match read_setting(&config, setting) {
            Ok(value) => generated.push_str(&format!(
                "pub const {}: {} = {};\n",
                setting.konst, setting.ty, value
            )),
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Configuration errors in focusbar.toml                    ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("config.rs"), generated).unwrap();

    println!("cargo:warning=focusbar.toml validated successfully");
}

/// Look up one integer setting and check its range
fn read_setting(config: &toml::Value, setting: &Setting) -> Result<i64, String> {
    let section = match config.get(setting.section) {
        Some(toml::Value::Table(t)) => t,
        Some(_) => return Err(format!("[{}] must be a table", setting.section)),
        None => return Err(format!("Missing [{}] section", setting.section)),
    };

    match section.get(setting.key) {
        Some(toml::Value::Integer(v)) if (setting.min..=setting.max).contains(v) => Ok(*v),
        Some(toml::Value::Integer(_)) => Err(format!(
            "[{}] {} must be {}-{}",
            setting.section, setting.key, setting.min, setting.max
        )),
        Some(_) => Err(format!(
            "[{}] {} must be an integer",
            setting.section, setting.key
        )),
        None => Err(format!("[{}] missing '{}'", setting.section, setting.key)),
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
