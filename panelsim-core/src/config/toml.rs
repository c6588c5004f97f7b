//! Simple TOML parser for panel configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! panel defaults. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments after values
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys
//!
//! Keys that are not recognised are skipped so that newer files still load.

use super::types::{PanelConfig, MAX_BATTERY_LEVEL, MAX_CYCLE_COUNT, MAX_TORQUE_LIMIT};
use crate::state::selection::{CustomLevelKey, TorqueSelection};
use crate::state::status::{AutoMode, HammerMode, SpeedLevel, ToolStatus};
use crate::variant::Variant;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value has the wrong type or is not recognised
    InvalidValue,
    /// Numeric value outside its documented range
    OutOfRange,
    /// Variant identifier not in the registry
    UnknownVariant,
    /// Parsed values violate a cross-field invariant
    Invalid,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Torque,
    CustomLevels,
    Industrial,
    Fixing,
    Timing,
}

/// A scalar TOML value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Bool(bool),
    Int(u32),
    Str(&'a str),
}

impl<'a> Value<'a> {
    fn as_bool(self) -> Result<bool, ParseError> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(ParseError::InvalidValue),
        }
    }

    fn as_int(self) -> Result<u32, ParseError> {
        match self {
            Value::Int(n) => Ok(n),
            _ => Err(ParseError::InvalidValue),
        }
    }

    fn as_str(self) -> Result<&'a str, ParseError> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(ParseError::InvalidValue),
        }
    }

    /// Integer no larger than `max`
    fn as_bounded(self, max: u32) -> Result<u32, ParseError> {
        let n = self.as_int()?;
        if n > max {
            return Err(ParseError::OutOfRange);
        }
        Ok(n)
    }
}

/// Parse TOML configuration into PanelConfig
///
/// Starts from `PanelConfig::default()`, so any key may be omitted. The
/// result is validated before it is returned.
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line)?;
        apply_value(&mut config, section, key, value)?;
    }

    config.validate().map_err(|_| ParseError::Invalid)?;
    Ok(config)
}

/// Remove a trailing comment, ignoring '#' inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(name: &str) -> Result<Section, ParseError> {
    match name.trim() {
        "panel" => Ok(Section::Panel),
        "torque" => Ok(Section::Torque),
        "custom_levels" => Ok(Section::CustomLevels),
        "industrial" => Ok(Section::Industrial),
        "fixing" => Ok(Section::Fixing),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Result<(&str, Value<'_>), ParseError> {
    let (key, raw) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::InvalidLine);
    }
    Ok((key, parse_value(raw.trim())?))
}

fn parse_value(raw: &str) -> Result<Value<'_>, ParseError> {
    match raw {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }

    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Ok(Value::Str(&raw[1..raw.len() - 1]));
    }

    // TOML allows '_' as a digit separator
    let mut n: u32 = 0;
    let mut digits = 0;
    for c in raw.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(d))
            .ok_or(ParseError::OutOfRange)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(Value::Int(n))
}

fn apply_value(
    config: &mut PanelConfig,
    section: Section,
    key: &str,
    value: Value<'_>,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Panel, "variant") => {
            config.variant = Variant::from_id(value.as_str()?).ok_or(ParseError::UnknownVariant)?;
        }
        (Section::Panel, "power_on") => config.power_on = value.as_bool()?,
        (Section::Panel, "tool_status") => {
            config.tool_status =
                ToolStatus::from_id(value.as_str()?).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Panel, "battery_level") => {
            config.battery_level = value.as_bounded(MAX_BATTERY_LEVEL as u32)? as u8;
        }
        (Section::Panel, "cycle_count") => {
            config.cycle_count = value.as_bounded(MAX_CYCLE_COUNT as u32)? as u16;
        }
        (Section::Panel, "mode") => {
            config.mode = HammerMode::from_id(value.as_str()?).ok_or(ParseError::InvalidValue)?;
        }

        (Section::Torque, "max_limit") => {
            config.max_torque_limit = value.as_bounded(MAX_TORQUE_LIMIT as u32)? as u8;
        }
        (Section::Torque, "selection") => {
            config.torque_selection = match value {
                Value::Int(_) => {
                    TorqueSelection::Numeric(value.as_bounded(MAX_TORQUE_LIMIT as u32)? as u8)
                }
                Value::Str(name) => TorqueSelection::Custom(
                    CustomLevelKey::from_name(name).ok_or(ParseError::InvalidValue)?,
                ),
                Value::Bool(_) => return Err(ParseError::InvalidValue),
            };
        }

        (Section::CustomLevels, name) => {
            if let Some(level) = CustomLevelKey::from_name(name) {
                config.custom_levels.set_active(level, value.as_bool()?);
            }
        }

        (Section::Industrial, "locked") => config.ind_status.locked = value.as_bool()?,
        (Section::Industrial, "kickback") => config.ind_status.kickback = value.as_bool()?,
        (Section::Industrial, "maintenance") => config.ind_status.maintenance = value.as_bool()?,
        (Section::Industrial, "nfc") => config.ind_status.nfc = value.as_bool()?,

        (Section::Fixing, "auto_mode") => {
            config.auto_mode = AutoMode::from_id(value.as_str()?).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Fixing, "speed") => {
            let level = value.as_bounded(u8::MAX as u32)? as u8;
            config.speed = SpeedLevel::new(level).ok_or(ParseError::OutOfRange)?;
        }

        (Section::Timing, "long_press_ms") => config.timing.long_press_ms = value.as_int()?,
        (Section::Timing, "maintenance_cycle_threshold") => {
            config.timing.maintenance_cycle_threshold = value.as_bounded(u16::MAX as u32)? as u16;
        }

        // Unknown key: skip
        _ => {}
    }
    Ok(())
}
