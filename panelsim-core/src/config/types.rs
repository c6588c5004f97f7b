//! Configuration type definitions
//!
//! These types hold the defaults a session starts from and resets to.
//! With the `serde` feature they can be handed to a presentation process as
//! postcard binary data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::gesture::LONG_PRESS_MS;
use crate::state::selection::{is_selectable, CustomLevels, TorqueSelection};
use crate::state::status::{AutoMode, HammerMode, IndStatus, SpeedLevel, ToolStatus};
use crate::variant::Variant;

/// Cycle count at which maintenance becomes due
pub const MAINTENANCE_CYCLE_THRESHOLD: u16 = 10_000;

/// Maximum simulated cycle count
pub const MAX_CYCLE_COUNT: u16 = 12_000;

/// Maximum torque limit (N)
pub const MAX_TORQUE_LIMIT: u8 = 99;

/// Minimum torque limit
pub const MIN_TORQUE_LIMIT: u8 = 0;

/// Maximum battery level (percent)
pub const MAX_BATTERY_LEVEL: u8 = 100;

/// Battery at or below this level is critical
pub const BATTERY_CRITICAL_LEVEL: u8 = 1;

/// Battery at or below this level is low
pub const BATTERY_WARNING_LEVEL: u8 = 20;

pub const DEFAULT_BATTERY_LEVEL: u8 = 85;
pub const DEFAULT_MAX_TORQUE_LIMIT: u8 = 50;
pub const DEFAULT_TORQUE_SELECTION: u8 = 50;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Battery level above 100%
    BatteryOutOfRange,
    /// Torque limit above the maximum
    TorqueLimitOutOfRange,
    /// Cycle count above the simulated maximum
    CycleCountOutOfRange,
    /// Default selection is not in the default sequence
    SelectionNotSelectable,
    /// Speed level outside 1-3
    SpeedOutOfRange,
    /// Zero hold time or threshold
    InvalidTiming,
    /// Binary (de)serialization failed
    Serialization,
}

/// Timing and threshold configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Hold time before a step-button press toggles the tool lock
    pub long_press_ms: u32,
    /// Cycle count at which maintenance becomes due
    pub maintenance_cycle_threshold: u16,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS_MS,
            maintenance_cycle_threshold: MAINTENANCE_CYCLE_THRESHOLD,
        }
    }
}

/// Session defaults
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Active variant at start
    pub variant: Variant,
    /// Power state at start
    pub power_on: bool,
    pub tool_status: ToolStatus,
    /// Battery level (percent)
    pub battery_level: u8,
    pub cycle_count: u16,
    /// Hammer drive mode
    pub mode: HammerMode,
    /// Maximum torque limit (0-99)
    pub max_torque_limit: u8,
    /// Initial torque selection
    pub torque_selection: TorqueSelection,
    pub custom_levels: CustomLevels,
    /// Industrial indicator flags
    pub ind_status: IndStatus,
    /// Fixing panel auto mode
    pub auto_mode: AutoMode,
    /// Fixing panel speed level
    pub speed: SpeedLevel,
    pub timing: TimingConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Industrial,
            power_on: true,
            tool_status: ToolStatus::Normal,
            battery_level: DEFAULT_BATTERY_LEVEL,
            cycle_count: 0,
            mode: HammerMode::Max,
            max_torque_limit: DEFAULT_MAX_TORQUE_LIMIT,
            torque_selection: TorqueSelection::Numeric(DEFAULT_TORQUE_SELECTION),
            custom_levels: CustomLevels::default(),
            ind_status: IndStatus::default(),
            auto_mode: AutoMode::SlowDown,
            speed: SpeedLevel::MIN,
            timing: TimingConfig::default(),
        }
    }
}

impl PanelConfig {
    /// Check ranges and cross-field invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.battery_level > MAX_BATTERY_LEVEL {
            return Err(ConfigError::BatteryOutOfRange);
        }
        if !(MIN_TORQUE_LIMIT..=MAX_TORQUE_LIMIT).contains(&self.max_torque_limit) {
            return Err(ConfigError::TorqueLimitOutOfRange);
        }
        if self.cycle_count > MAX_CYCLE_COUNT {
            return Err(ConfigError::CycleCountOutOfRange);
        }
        if !is_selectable(
            self.torque_selection,
            self.max_torque_limit,
            &self.custom_levels,
        ) {
            return Err(ConfigError::SelectionNotSelectable);
        }
        if SpeedLevel::new(self.speed.get()).is_none() {
            return Err(ConfigError::SpeedOutOfRange);
        }
        if self.timing.long_press_ms == 0 || self.timing.maintenance_cycle_threshold == 0 {
            return Err(ConfigError::InvalidTiming);
        }
        Ok(())
    }

    /// Serialize into `buf` as postcard binary data
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialization)
    }

    /// Deserialize and validate postcard binary data
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Serialization)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::selection::CustomLevelKey;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(PanelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_selection_must_be_selectable() {
        let mut config = PanelConfig::default();
        config.torque_selection = TorqueSelection::Numeric(60);
        assert_eq!(config.validate(), Err(ConfigError::SelectionNotSelectable));

        config.torque_selection = TorqueSelection::Custom(CustomLevelKey::C3);
        assert_eq!(config.validate(), Err(ConfigError::SelectionNotSelectable));

        config.torque_selection = TorqueSelection::Custom(CustomLevelKey::C2);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_ranges() {
        let mut config = PanelConfig::default();
        config.battery_level = 101;
        assert_eq!(config.validate(), Err(ConfigError::BatteryOutOfRange));

        let mut config = PanelConfig::default();
        config.max_torque_limit = 100;
        assert_eq!(config.validate(), Err(ConfigError::TorqueLimitOutOfRange));

        let mut config = PanelConfig::default();
        config.cycle_count = MAX_CYCLE_COUNT + 1;
        assert_eq!(config.validate(), Err(ConfigError::CycleCountOutOfRange));

        let mut config = PanelConfig::default();
        config.timing.long_press_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTiming));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_roundtrip() {
        let mut config = PanelConfig::default();
        config.variant = Variant::DcHammer;
        config.battery_level = 15;

        let mut buf = [0u8; 128];
        let len = config.to_bytes(&mut buf).unwrap().len();
        let decoded = PanelConfig::from_bytes(&buf[..len]).unwrap();
        assert_eq!(decoded, config);
    }
}
