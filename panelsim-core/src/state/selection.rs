//! Torque selection sequencing
//!
//! The selectable settings form one ordered sequence: the numeric levels
//! `0..=max_limit` followed by the active custom presets. Stepping moves one
//! position along that sequence and saturates at either end.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MAX_TORQUE_LIMIT;

/// Number of custom preset levels
pub const CUSTOM_LEVEL_COUNT: usize = 3;

/// Longest possible selection sequence
pub const MAX_SEQUENCE_LEN: usize = MAX_TORQUE_LIMIT as usize + 1 + CUSTOM_LEVEL_COUNT;

/// Custom preset identifier
///
/// Variant order is the lexicographic order of the key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CustomLevelKey {
    C1,
    C2,
    C3,
}

impl CustomLevelKey {
    pub const ALL: [CustomLevelKey; CUSTOM_LEVEL_COUNT] =
        [CustomLevelKey::C1, CustomLevelKey::C2, CustomLevelKey::C3];

    /// Key at a configuration-switch position
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse a key name ("C1".."C3")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "C1" => Some(CustomLevelKey::C1),
            "C2" => Some(CustomLevelKey::C2),
            "C3" => Some(CustomLevelKey::C3),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            CustomLevelKey::C1 => 0,
            CustomLevelKey::C2 => 1,
            CustomLevelKey::C3 => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CustomLevelKey::C1 => "C1",
            CustomLevelKey::C2 => "C2",
            CustomLevelKey::C3 => "C3",
        }
    }
}

/// Activation state of the custom presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomLevels {
    active: [bool; CUSTOM_LEVEL_COUNT],
}

impl Default for CustomLevels {
    /// C1 and C2 active, C3 inactive
    fn default() -> Self {
        Self {
            active: [true, true, false],
        }
    }
}

impl CustomLevels {
    /// All presets inactive
    pub const fn none() -> Self {
        Self {
            active: [false; CUSTOM_LEVEL_COUNT],
        }
    }

    pub const fn from_flags(active: [bool; CUSTOM_LEVEL_COUNT]) -> Self {
        Self { active }
    }

    pub fn is_active(&self, key: CustomLevelKey) -> bool {
        self.active[key.index()]
    }

    pub fn set_active(&mut self, key: CustomLevelKey, active: bool) {
        self.active[key.index()] = active;
    }

    /// Flip a preset, returning its new activation state
    pub fn toggle(&mut self, key: CustomLevelKey) -> bool {
        let flag = &mut self.active[key.index()];
        *flag = !*flag;
        *flag
    }

    /// Active keys in sorted order
    pub fn active_keys(&self) -> impl Iterator<Item = CustomLevelKey> + '_ {
        CustomLevelKey::ALL
            .into_iter()
            .filter(move |key| self.is_active(*key))
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|a| **a).count()
    }
}

/// A selectable torque setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TorqueSelection {
    /// Numeric level, 0 = highest torque ("H")
    Numeric(u8),
    /// Custom preset
    Custom(CustomLevelKey),
}

impl Default for TorqueSelection {
    fn default() -> Self {
        TorqueSelection::Numeric(50)
    }
}

/// Ordered selection sequence
pub type Sequence = Vec<TorqueSelection, MAX_SEQUENCE_LEN>;

/// Build the full selection sequence
///
/// Numeric levels `0..=max_limit` in ascending order, followed by the active
/// custom keys in sorted order. `max_limit` above [`MAX_TORQUE_LIMIT`] is
/// treated as the maximum.
pub fn full_sequence(max_limit: u8, custom_levels: &CustomLevels) -> Sequence {
    let max_limit = max_limit.min(MAX_TORQUE_LIMIT);
    let mut sequence = Sequence::new();

    for level in 0..=max_limit {
        // Capacity covers MAX_TORQUE_LIMIT + 1 numeric levels
        let _ = sequence.push(TorqueSelection::Numeric(level));
    }
    for key in custom_levels.active_keys() {
        let _ = sequence.push(TorqueSelection::Custom(key));
    }

    sequence
}

/// Step one position along the sequence
///
/// Out-of-range moves are rejected and return `current` unchanged. A
/// `current` that is not in the sequence is treated as sitting just before
/// the first element, so `+1` selects `sequence[0]` and `-1` is a no-op.
pub fn adjust_selection(
    current: TorqueSelection,
    delta: i8,
    sequence: &[TorqueSelection],
) -> TorqueSelection {
    let index = sequence
        .iter()
        .position(|s| *s == current)
        .map_or(-1, |i| i as isize);
    let new_index = index + delta as isize;

    if new_index < 0 || new_index >= sequence.len() as isize {
        return current;
    }

    sequence[new_index as usize]
}

/// Check whether a selection belongs to the current sequence
pub fn is_selectable(
    selection: TorqueSelection,
    max_limit: u8,
    custom_levels: &CustomLevels,
) -> bool {
    match selection {
        TorqueSelection::Numeric(n) => n <= max_limit.min(MAX_TORQUE_LIMIT),
        TorqueSelection::Custom(key) => custom_levels.is_active(key),
    }
}
