//! Read-only view of a session for the presentation layer

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::selection::{CustomLevels, TorqueSelection};
use super::status::{AutoMode, HammerMode, IndStatus, SpeedLevel, ToolStatus};
use crate::variant::{Features, Variant};

/// Every entity of a session plus the derived flags
///
/// Taken after reconciliation, so the invariants between fields hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelSnapshot {
    pub variant: Variant,
    pub power_on: bool,
    pub tool_status: ToolStatus,
    pub ind_status: IndStatus,
    /// Battery level (percent)
    pub battery_level: u8,
    pub cycle_count: u16,
    pub max_torque_limit: u8,
    pub custom_levels: CustomLevels,
    pub torque_selection: TorqueSelection,
    pub mode: HammerMode,
    pub auto_mode: AutoMode,
    pub speed: SpeedLevel,

    /// Device controls reject input
    pub interaction_disabled: bool,
    /// Cycle threshold reached or maintenance flag set
    pub maintenance_needed: bool,
    /// Tool status is `Error` or `SafetyError`
    pub tool_locked: bool,
    /// A step button is held and the lock toggle has not fired yet
    pub lock_gesture_pending: bool,
}

impl PanelSnapshot {
    /// Capabilities of the active variant
    pub fn features(&self) -> Features {
        self.variant.features()
    }
}
