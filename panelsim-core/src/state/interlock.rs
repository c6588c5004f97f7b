//! Interaction interlock
//!
//! Decides whether device controls accept input. Pure and memoryless:
//! re-evaluated from the current state on every read.

use super::status::{IndStatus, ToolStatus};
use crate::variant::Features;

/// Interaction is disabled when power is off, the tool is status-locked,
/// or the industrial hard lock is engaged.
pub fn is_interaction_disabled(
    power_on: bool,
    tool_locked: bool,
    industrial_locked: bool,
) -> bool {
    !power_on || tool_locked || industrial_locked
}

/// Industrial hard lock, effective only on variants with industrial status
pub fn industrial_locked(features: &Features, ind_status: &IndStatus) -> bool {
    features.has_industrial_status && ind_status.locked
}

/// Inputs to the interlock, gathered from a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interlock {
    pub power_on: bool,
    pub tool_locked: bool,
    pub industrial_locked: bool,
}

impl Interlock {
    /// Gather interlock inputs
    pub fn evaluate(
        power_on: bool,
        tool_status: ToolStatus,
        features: &Features,
        ind_status: &IndStatus,
    ) -> Self {
        Self {
            power_on,
            tool_locked: tool_status.is_tool_locked(),
            industrial_locked: industrial_locked(features, ind_status),
        }
    }

    /// Device controls reject input
    pub fn is_disabled(&self) -> bool {
        is_interaction_disabled(self.power_on, self.tool_locked, self.industrial_locked)
    }

    /// A long press may begin
    ///
    /// Ignores the industrial hard lock so that a locked panel can be
    /// unlocked by holding a step button.
    pub fn allows_lock_gesture(&self) -> bool {
        self.power_on && !self.tool_locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    #[test]
    fn test_truth_table() {
        assert!(!is_interaction_disabled(true, false, false));
        assert!(is_interaction_disabled(false, false, false));
        assert!(is_interaction_disabled(true, true, false));
        assert!(is_interaction_disabled(true, false, true));
        assert!(is_interaction_disabled(false, true, true));
    }

    #[test]
    fn test_industrial_lock_only_on_industrial() {
        let locked = IndStatus {
            locked: true,
            ..IndStatus::default()
        };
        assert!(industrial_locked(&Variant::Industrial.features(), &locked));
        assert!(!industrial_locked(&Variant::AcHammer.features(), &locked));
        assert!(!industrial_locked(&Variant::Fixing1.features(), &locked));
    }

    #[test]
    fn test_lock_gesture_ignores_hard_lock() {
        let locked = IndStatus {
            locked: true,
            ..IndStatus::default()
        };
        let features = Variant::Industrial.features();

        let interlock = Interlock::evaluate(true, ToolStatus::Normal, &features, &locked);
        assert!(interlock.is_disabled());
        assert!(interlock.allows_lock_gesture());

        let faulted = Interlock::evaluate(true, ToolStatus::Error, &features, &locked);
        assert!(!faulted.allows_lock_gesture());

        let off = Interlock::evaluate(false, ToolStatus::Normal, &features, &locked);
        assert!(!off.allows_lock_gesture());
    }

    #[test]
    fn test_warning_does_not_disable() {
        let features = Variant::DcHammer.features();
        let interlock =
            Interlock::evaluate(true, ToolStatus::Warning, &features, &IndStatus::default());
        assert!(!interlock.is_disabled());
    }
}
