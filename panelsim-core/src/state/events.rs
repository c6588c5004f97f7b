//! Events that mutate a session

use super::selection::CustomLevelKey;
use super::status::{HammerMode, IndStatusKey, SpeedLevel, ToolStatus};
use crate::variant::{Feature, Variant};

/// Semantic panel events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Simulation inputs
    /// Power button pressed
    TogglePower,
    /// Variant switcher changed
    SelectVariant(Variant),
    /// Status simulation button pressed
    SetToolStatus(ToolStatus),
    /// Torque limit slider moved
    SetMaxTorqueLimit(u8),
    /// Battery slider moved
    SetBatteryLevel(u8),
    /// Cycle count slider moved
    SetCycleCount(u16),

    // Configuration
    /// Custom level switch flipped
    ToggleCustomLevel(CustomLevelKey),

    // Device controls
    /// Industrial indicator toggle pressed
    ToggleIndStatus(IndStatusKey),
    /// Hammer mode button pressed
    SelectMode(HammerMode),
    /// Torque step (+1 / -1)
    StepTorque(i8),
    /// Fixing panel MODE button pressed
    ToggleAutoMode,
    /// Fixing panel SPEED button pressed
    CycleSpeed,
    /// Fixing panel speed level button pressed
    SelectSpeed(SpeedLevel),
    /// Long press on a step button completed
    ToggleLock,
}

impl Event {
    /// Check if this event comes from the simulation control panel
    pub fn is_simulation_input(&self) -> bool {
        matches!(
            self,
            Event::TogglePower
                | Event::SelectVariant(_)
                | Event::SetToolStatus(_)
                | Event::SetMaxTorqueLimit(_)
                | Event::SetBatteryLevel(_)
                | Event::SetCycleCount(_)
        )
    }

    /// Capability the active variant needs to accept this event
    pub fn required_feature(&self) -> Option<Feature> {
        match self {
            Event::ToggleCustomLevel(_) | Event::StepTorque(_) => Some(Feature::CustomLevels),
            Event::ToggleIndStatus(_) => Some(Feature::IndustrialStatus),
            Event::SelectMode(_) => Some(Feature::ModeSelection),
            Event::ToggleAutoMode => Some(Feature::AutoMode),
            Event::CycleSpeed | Event::SelectSpeed(_) => Some(Feature::SpeedControl),
            _ => None,
        }
    }

    /// Check if this event operates a device control guarded by the interlock
    ///
    /// Clearing an active kickback is exempt at dispatch time; see
    /// `Session::apply`.
    pub fn is_interlocked(&self) -> bool {
        matches!(
            self,
            Event::ToggleIndStatus(_)
                | Event::SelectMode(_)
                | Event::StepTorque(_)
                | Event::ToggleAutoMode
                | Event::CycleSpeed
                | Event::SelectSpeed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_inputs() {
        assert!(Event::TogglePower.is_simulation_input());
        assert!(Event::SetCycleCount(100).is_simulation_input());
        assert!(!Event::StepTorque(1).is_simulation_input());
        assert!(!Event::ToggleCustomLevel(CustomLevelKey::C1).is_simulation_input());
    }

    #[test]
    fn test_interlocked_events() {
        assert!(Event::StepTorque(-1).is_interlocked());
        assert!(Event::ToggleIndStatus(IndStatusKey::Nfc).is_interlocked());
        assert!(Event::CycleSpeed.is_interlocked());
        // Configuration and lock gesture bypass the interlock
        assert!(!Event::ToggleCustomLevel(CustomLevelKey::C2).is_interlocked());
        assert!(!Event::ToggleLock.is_interlocked());
        assert!(!Event::SetToolStatus(ToolStatus::Normal).is_interlocked());
    }

    #[test]
    fn test_required_feature() {
        assert_eq!(Event::StepTorque(1).required_feature(), Some(Feature::CustomLevels));
        assert_eq!(
            Event::ToggleIndStatus(IndStatusKey::Locked).required_feature(),
            Some(Feature::IndustrialStatus)
        );
        assert_eq!(Event::CycleSpeed.required_feature(), Some(Feature::SpeedControl));
        // Simulation inputs and the lock gesture work on every variant
        assert_eq!(Event::TogglePower.required_feature(), None);
        assert_eq!(Event::ToggleLock.required_feature(), None);
        for event in [Event::TogglePower, Event::SetBatteryLevel(3), Event::ToggleLock] {
            assert!(!event.is_interlocked());
        }
    }
}
