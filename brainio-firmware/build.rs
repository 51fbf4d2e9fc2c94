//! Build script for brainio-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates keymap.toml at compile time
//! - Generates the board constants and keymap table from it

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest Linux input event code (KEY_MAX)
const KEY_MAX: i64 = 0x2ff;

/// Raw key slots on the controller
const KEY_SLOTS: i64 = 64;

fn main() {
    setup_linker();
    let config = load_config();
    validate_config(&config);
    generate_keymap(&config);
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

/// Read and parse keymap.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=keymap.toml");

    let config_path = Path::new("keymap.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: keymap.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a keymap.toml board configuration.        ║\n\
            ║  Please create one in the brainio-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read keymap.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in keymap.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
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

/// Panic with a boxed list of validation errors
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_config(config: &toml::Value) {
    validate_keyboard(config);
    validate_display(config);
    validate_keys(config);
    println!("cargo:warning=keymap.toml validated successfully");
}

/// Validate the [keyboard] section
fn validate_keyboard(config: &toml::Value) {
    let mut errors = Vec::new();

    match config.get("keyboard") {
        Some(toml::Value::Table(kbd)) => {
            match kbd.get("address") {
                Some(toml::Value::Integer(addr)) if (0x03..=0x77).contains(addr) => {}
                Some(_) => errors.push("[keyboard] address must be a 7-bit address (0x03-0x77)".to_string()),
                None => errors.push("[keyboard] missing 'address'".to_string()),
            }
            match kbd.get("symbol_keycode") {
                None => {}
                Some(toml::Value::Integer(code)) if (0..KEY_SLOTS).contains(code) => {}
                Some(_) => errors.push("[keyboard] symbol_keycode must be 0-63".to_string()),
            }
        }
        Some(_) => errors.push("[keyboard] must be a table".to_string()),
        None => errors.push("Missing [keyboard] section".to_string()),
    }

    report("Invalid keyboard configuration", &errors);
}

/// Validate the optional [display] section
fn validate_display(config: &toml::Value) {
    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            report("Invalid display configuration", &["[display] must be a table".to_string()]);
            return;
        }
        None => return,
    };

    let mut errors = Vec::new();

    if let Some(rotation) = display.get("rotation") {
        match rotation.as_integer() {
            Some(0 | 90 | 180 | 270) => {}
            _ => errors.push("[display] rotation must be 0, 90, 180 or 270".to_string()),
        }
    }

    if let Some(freq) = display.get("spi_frequency") {
        match freq.as_integer() {
            Some(f) if f > 0 && f <= 62_500_000 => {}
            _ => errors.push("[display] spi_frequency must be 1-62500000 Hz".to_string()),
        }
    }

    report("Invalid display configuration", &errors);
}

/// Validate the [[key]] array
fn validate_keys(config: &toml::Value) {
    let keys = match config.get("key") {
        Some(toml::Value::Array(keys)) if !keys.is_empty() => keys,
        Some(toml::Value::Array(_)) | None => {
            report(
                "Missing keymap",
                &["At least one [[key]] entry is required".to_string()],
            );
            return;
        }
        Some(_) => {
            report("Invalid keymap", &["key must be an array of tables".to_string()]);
            return;
        }
    };

    let mut errors = Vec::new();
    let mut seen = Vec::new();

    for (i, key) in keys.iter().enumerate() {
        let key = match key.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("[[key]] {} must be a table", i));
                continue;
            }
        };

        match key.get("raw").and_then(|v| v.as_integer()) {
            Some(raw) if (0..KEY_SLOTS).contains(&raw) => {
                if seen.contains(&raw) {
                    println!(
                        "cargo:warning=keymap.toml: raw key {:#04x} mapped twice, last entry wins",
                        raw
                    );
                }
                seen.push(raw);
            }
            Some(_) => errors.push(format!("[[key]] {} raw must be 0-63", i)),
            None => errors.push(format!("[[key]] {} missing integer 'raw'", i)),
        }

        for field in ["normal", "symbol"] {
            match key.get(field).map(|v| v.as_integer()) {
                None => {}
                Some(Some(code)) if (0..=KEY_MAX).contains(&code) => {}
                Some(_) => errors.push(format!("[[key]] {} {} must be 0-{}", i, field, KEY_MAX)),
            }
        }
    }

    report("Invalid keymap", &errors);
}

/// Write OUT_DIR/keymap.rs with the board constants and keymap table
fn generate_keymap(config: &toml::Value) {
    let int = |section: &str, field: &str| {
        config
            .get(section)
            .and_then(|s| s.get(field))
            .and_then(|v| v.as_integer())
    };

    let address = int("keyboard", "address").unwrap_or_default();
    let symbol = match int("keyboard", "symbol_keycode") {
        Some(code) => format!("Some({:#04x})", code),
        None => "None".to_string(),
    };
    let rotation = int("display", "rotation").unwrap_or(0);
    let spi_frequency = int("display", "spi_frequency").unwrap_or(10_000_000);

    let mut out = String::new();
    writeln!(out, "// Generated from keymap.toml by build.rs").unwrap();
    writeln!(out, "pub const KEYBOARD_ADDRESS: u8 = {:#04x};", address).unwrap();
    writeln!(out, "pub const SYMBOL_KEYCODE: Option<u8> = {};", symbol).unwrap();
    writeln!(out, "pub const ROTATION_DEGREES: u16 = {};", rotation).unwrap();
    writeln!(out, "pub const SPI_FREQUENCY: u32 = {};", spi_frequency).unwrap();
    writeln!(out, "pub const KEYMAP: &[KeymapTriple] = &[").unwrap();

    let keys = config
        .get("key")
        .and_then(|k| k.as_array())
        .cloned()
        .unwrap_or_default();
    for key in &keys {
        let field = |name: &str| key.get(name).and_then(|v| v.as_integer()).unwrap_or(0);
        writeln!(
            out,
            "    KeymapTriple::new({:#04x}, {}, {}),",
            field("raw"),
            field("normal"),
            field("symbol")
        )
        .unwrap();
    }
    writeln!(out, "];").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("keymap.rs"), out).unwrap();
}
