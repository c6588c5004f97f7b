//! Tool status, industrial indicators and per-variant operating modes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Simulated tool status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ToolStatus {
    #[default]
    Normal,
    Warning,
    Error,
    /// Safety stop (kickback on industrial tools)
    SafetyError,
}

impl ToolStatus {
    /// All statuses in simulation-button order
    pub const ALL: [ToolStatus; 4] = [
        ToolStatus::Normal,
        ToolStatus::Warning,
        ToolStatus::Error,
        ToolStatus::SafetyError,
    ];

    /// Status at a simulation-button position
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse a configuration identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "normal" => Some(ToolStatus::Normal),
            "warning" => Some(ToolStatus::Warning),
            "error" => Some(ToolStatus::Error),
            "safety_error" => Some(ToolStatus::SafetyError),
            _ => None,
        }
    }

    /// Error and safety error lock the tool
    pub fn is_tool_locked(&self) -> bool {
        matches!(self, ToolStatus::Error | ToolStatus::SafetyError)
    }
}

/// Key of an industrial status flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndStatusKey {
    /// Hard interaction lock (T)
    Locked,
    /// Kickback control triggered
    Kickback,
    /// Manual maintenance reminder
    Maintenance,
    /// NFC communication active
    Nfc,
}

impl IndStatusKey {
    pub const ALL: [IndStatusKey; 4] = [
        IndStatusKey::Locked,
        IndStatusKey::Kickback,
        IndStatusKey::Maintenance,
        IndStatusKey::Nfc,
    ];

    /// Key at an indicator-toggle position
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Industrial indicator flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndStatus {
    pub locked: bool,
    pub kickback: bool,
    pub maintenance: bool,
    pub nfc: bool,
}

impl IndStatus {
    /// Read a flag by key
    pub fn get(&self, key: IndStatusKey) -> bool {
        match key {
            IndStatusKey::Locked => self.locked,
            IndStatusKey::Kickback => self.kickback,
            IndStatusKey::Maintenance => self.maintenance,
            IndStatusKey::Nfc => self.nfc,
        }
    }

    /// Flip a flag, returning its new value
    pub fn toggle(&mut self, key: IndStatusKey) -> bool {
        let flag = match key {
            IndStatusKey::Locked => &mut self.locked,
            IndStatusKey::Kickback => &mut self.kickback,
            IndStatusKey::Maintenance => &mut self.maintenance,
            IndStatusKey::Nfc => &mut self.nfc,
        };
        *flag = !*flag;
        *flag
    }
}

/// Hammer drive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HammerMode {
    /// Full speed
    #[default]
    Max,
    /// Reduced speed
    Soft,
}

impl HammerMode {
    /// Parse a configuration identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "max" => Some(HammerMode::Max),
            "soft" => Some(HammerMode::Soft),
            _ => None,
        }
    }

    /// Motor speed as percent of maximum
    pub const fn speed_percent(&self) -> u8 {
        match self {
            HammerMode::Max => 100,
            HammerMode::Soft => 70,
        }
    }
}

/// Fixing panel automatic mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AutoMode {
    #[default]
    SlowDown,
    Stop,
}

impl AutoMode {
    /// Parse a configuration identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "slow_down" => Some(AutoMode::SlowDown),
            "stop" => Some(AutoMode::Stop),
            _ => None,
        }
    }

    /// The other mode
    pub const fn toggled(self) -> Self {
        match self {
            AutoMode::SlowDown => AutoMode::Stop,
            AutoMode::Stop => AutoMode::SlowDown,
        }
    }
}

/// Fixing panel speed level (1-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedLevel(u8);

impl SpeedLevel {
    pub const MIN: SpeedLevel = SpeedLevel(1);
    pub const MAX: SpeedLevel = SpeedLevel(3);

    /// Create a speed level, rejecting values outside 1-3
    pub const fn new(level: u8) -> Option<Self> {
        if level >= Self::MIN.0 && level <= Self::MAX.0 {
            Some(SpeedLevel(level))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Next level, wrapping 3 back to 1
    pub const fn cycled(self) -> Self {
        if self.0 >= Self::MAX.0 {
            Self::MIN
        } else {
            SpeedLevel(self.0 + 1)
        }
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        Self::MIN
    }
}
