//! Build script for panelsim-core
//!
//! Validates panel.toml at compile time so a broken default configuration
//! fails the build instead of `PanelConfig::embedded()` at runtime.

use std::fs;
use std::path::Path;

const VARIANTS: [&str; 4] = ["standard", "segmented", "industrial", "fixing1"];
const TOOL_STATUSES: [&str; 4] = ["normal", "warning", "error", "safety_error"];
const MODES: [&str; 2] = ["max", "soft"];
const AUTO_MODES: [&str; 2] = ["slow_down", "stop"];
const CUSTOM_LEVELS: [&str; 3] = ["C1", "C2", "C3"];

fn main() {
    println!("cargo:rerun-if-changed=panel.toml");
    println!("cargo:rerun-if-changed=build.rs");
    validate_config();
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    let config_path = Path::new("panel.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in panel.toml                        ║\n\
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
    validate_panel(&config, &mut errors);
    validate_torque(&config, &mut errors);
    validate_flags(&config, "custom_levels", &mut errors);
    validate_flags(&config, "industrial", &mut errors);
    validate_fixing(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
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

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    config.get(name).and_then(|s| s.as_table())
}

fn check_choice(
    table: &toml::Table,
    section: &str,
    key: &str,
    allowed: &[&str],
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::String(s)) if allowed.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be one of {}",
            section,
            key,
            allowed.join(", ")
        )),
    }
}

fn check_range(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(n)) if (min..=max).contains(n) => {}
        Some(_) => errors.push(format!("[{}] {} must be {}-{}", section, key, min, max)),
    }
}

fn validate_panel(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(panel) = section(config, "panel") else {
        return;
    };
    check_choice(panel, "panel", "variant", &VARIANTS, errors);
    check_choice(panel, "panel", "tool_status", &TOOL_STATUSES, errors);
    check_choice(panel, "panel", "mode", &MODES, errors);
    check_range(panel, "panel", "battery_level", 0, 100, errors);
    check_range(panel, "panel", "cycle_count", 0, 12_000, errors);
    if let Some(power) = panel.get("power_on") {
        if !power.is_bool() {
            errors.push("[panel] power_on must be true or false".to_string());
        }
    }
}

fn validate_torque(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(torque) = section(config, "torque") else {
        return;
    };
    check_range(torque, "torque", "max_limit", 0, 99, errors);

    let max_limit = torque
        .get("max_limit")
        .and_then(|v| v.as_integer())
        .unwrap_or(50);

    match torque.get("selection") {
        None => {}
        Some(toml::Value::Integer(n)) => {
            if *n < 0 || *n > max_limit {
                errors.push(format!("[torque] selection must be 0-{}", max_limit));
            }
        }
        Some(toml::Value::String(key)) => {
            if !CUSTOM_LEVELS.contains(&key.as_str()) {
                errors.push("[torque] selection must be a number or C1/C2/C3".to_string());
            } else if !custom_level_active(config, key) {
                errors.push(format!("[torque] selection {} is not an active custom level", key));
            }
        }
        Some(_) => errors.push("[torque] selection must be a number or C1/C2/C3".to_string()),
    }
}

/// Activation of a custom level, falling back to the built-in default
fn custom_level_active(config: &toml::Value, key: &str) -> bool {
    section(config, "custom_levels")
        .and_then(|t| t.get(key))
        .and_then(|v| v.as_bool())
        .unwrap_or(key != "C3")
}

fn validate_flags(config: &toml::Value, name: &str, errors: &mut Vec<String>) {
    let Some(table) = section(config, name) else {
        return;
    };
    for (key, value) in table {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", name, key));
        }
    }
}

fn validate_fixing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(fixing) = section(config, "fixing") else {
        return;
    };
    check_choice(fixing, "fixing", "auto_mode", &AUTO_MODES, errors);
    check_range(fixing, "fixing", "speed", 1, 3, errors);
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = section(config, "timing") else {
        return;
    };
    check_range(timing, "timing", "long_press_ms", 1, u32::MAX as i64, errors);
    check_range(timing, "timing", "maintenance_cycle_threshold", 1, u16::MAX as i64, errors);
}
