//! Build script for tactus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates tactus.toml at compile time
//! - Generates the configuration constants compiled into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Values used when a key is absent from tactus.toml
const DEFAULT_VARIANT: &str = "dual";
const DEFAULT_MAX_PULSE_MS: i64 = 10_000;
const DEFAULT_PULSE_MS: i64 = 200;
const DEFAULT_GAP_MS: i64 = 150;
const DEFAULT_BAUDRATE: i64 = 9600;

/// Validated configuration values
struct Settings {
    variant: &'static str,
    max_pulse_ms: i64,
    pulse_ms: i64,
    gap_ms: i64,
    baudrate: i64,
    active_low: bool,
}

fn main() {
    setup_linker();
    let settings = validate_config();
    generate_config(&settings);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate tactus.toml configuration at compile time
fn validate_config() -> Settings {
    println!("cargo:rerun-if-changed=tactus.toml");

    let config_path = Path::new("tactus.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: tactus.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a tactus.toml configuration file.         ║\n\
            ║  Please create one in the tactus-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read tactus.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in tactus.toml                       ║\n\
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
    let settings = read_settings(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in tactus.toml                     ║\n\
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

    println!("cargo:warning=tactus.toml validated successfully");
    settings
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

/// Read and range-check every setting, collecting errors
fn read_settings(config: &toml::Value, errors: &mut Vec<String>) -> Settings {
    let variant = match get(config, "protocol", "variant") {
        None => DEFAULT_VARIANT,
        Some(toml::Value::String(s)) => match s.as_str() {
            "dual" => "dual",
            "pattern" | "pattern-only" => "pattern",
            _ => {
                errors.push("[protocol] variant must be 'dual' or 'pattern'".to_string());
                DEFAULT_VARIANT
            }
        },
        Some(_) => {
            errors.push("[protocol] variant must be a string".to_string());
            DEFAULT_VARIANT
        }
    };

    let max_pulse_ms = integer(config, "protocol", "max_pulse_ms", DEFAULT_MAX_PULSE_MS, errors);
    let pulse_ms = integer(config, "protocol", "pulse_ms", DEFAULT_PULSE_MS, errors);
    let gap_ms = integer(config, "protocol", "gap_ms", DEFAULT_GAP_MS, errors);
    let baudrate = integer(config, "serial", "baudrate", DEFAULT_BAUDRATE, errors);

    if !(1..=u32::MAX as i64).contains(&max_pulse_ms) {
        errors.push("[protocol] max_pulse_ms must be at least 1".to_string());
    }
    if pulse_ms < 1 || pulse_ms > max_pulse_ms {
        errors.push("[protocol] pulse_ms must be 1..=max_pulse_ms".to_string());
    }
    if gap_ms < 0 || gap_ms > max_pulse_ms {
        errors.push("[protocol] gap_ms must be 0..=max_pulse_ms".to_string());
    }
    if !(300..=921_600).contains(&baudrate) {
        errors.push("[serial] baudrate must be 300-921600".to_string());
    }

    let active_low = match get(config, "actuator", "active_low") {
        None => false,
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("[actuator] active_low must be true or false".to_string());
            false
        }
    };

    Settings {
        variant,
        max_pulse_ms,
        pulse_ms,
        gap_ms,
        baudrate,
        active_low,
    }
}

fn get<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match get(config, section, key) {
        None => default,
        Some(toml::Value::Integer(v)) => *v,
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            default
        }
    }
}

/// Write the configuration constants included by src/config.rs
fn generate_config(settings: &Settings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let variant = match settings.variant {
        "pattern" => "ProtocolVariant::PatternOnly",
        _ => "ProtocolVariant::Dual",
    };

    let generated = format!(
        "// Generated from tactus.toml by build.rs\n\
         pub const VARIANT: ProtocolVariant = {};\n\
         pub const MAX_PULSE_MS: u32 = {};\n\
         pub const PULSE_MS: u32 = {};\n\
         pub const GAP_MS: u32 = {};\n\
         pub const BAUD_RATE: u32 = {};\n\
         pub const ACTUATOR_ACTIVE_LOW: bool = {};\n",
        variant,
        settings.max_pulse_ms,
        settings.pulse_ms,
        settings.gap_ms,
        settings.baudrate,
        settings.active_low,
    );

    fs::write(out_dir.join("tactus_config.rs"), generated).unwrap();
}
