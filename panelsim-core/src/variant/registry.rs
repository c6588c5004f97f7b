//! Static variant table
//!
//! Maps each product façade to its screen composition and capability flags.
//! Adding a variant means adding an enum case and a table row.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supported product variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    /// AC hammer drill, single solid status bar
    AcHammer,
    /// DC hammer drill, five-bar battery/status display
    DcHammer,
    /// Torque-controlled industrial driver with 7-segment readout
    #[default]
    Industrial,
    /// Vertical fixing-tool panel with auto mode and 3-speed control
    Fixing1,
}

/// Which screen body the presentation layer should compose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScreenKind {
    /// MAX/SOFT mode buttons under a status bar
    HammerModes,
    /// Indicator row, torque readout and +/- buttons
    IndustrialTorque,
    /// Auto mode lamps and speed level buttons
    FixingPanel,
}

/// Named capability, for single-flag lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feature {
    BatteryDisplay,
    SegmentedDisplay,
    ModeSelection,
    CustomLevels,
    IndustrialStatus,
    AutoMode,
    SpeedControl,
}

/// Capability flags of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Features {
    /// Battery level drives part of the device screen
    pub has_battery_display: bool,
    /// Top bar is split into five segments
    pub has_segmented_display: bool,
    /// MAX/SOFT mode buttons
    pub has_mode_selection: bool,
    /// Torque selection with custom preset levels
    pub has_custom_levels: bool,
    /// Industrial indicators, kickback coupling and hard lock
    pub has_industrial_status: bool,
    /// Auto slow-down / auto stop mode
    pub has_auto_mode: bool,
    /// Three-level speed selection
    pub has_speed_control: bool,
}

impl Features {
    /// Look up a single capability
    pub const fn has(&self, feature: Feature) -> bool {
        match feature {
            Feature::BatteryDisplay => self.has_battery_display,
            Feature::SegmentedDisplay => self.has_segmented_display,
            Feature::ModeSelection => self.has_mode_selection,
            Feature::CustomLevels => self.has_custom_levels,
            Feature::IndustrialStatus => self.has_industrial_status,
            Feature::AutoMode => self.has_auto_mode,
            Feature::SpeedControl => self.has_speed_control,
        }
    }
}

/// One row of the variant table
#[derive(Debug, Clone, Copy)]
pub struct VariantInfo {
    pub variant: Variant,
    /// Stable identifier used in configuration files
    pub id: &'static str,
    /// Name shown on the variant switcher
    pub display_name: &'static str,
    pub description: &'static str,
    pub screen: ScreenKind,
    pub features: Features,
}

/// The variant table, in switcher order
pub static VARIANTS: [VariantInfo; 4] = [
    VariantInfo {
        variant: Variant::AcHammer,
        id: "standard",
        display_name: "AC Hammer",
        description: "AC-powered hammer with single solid status bar",
        screen: ScreenKind::HammerModes,
        features: Features {
            has_battery_display: false,
            has_segmented_display: false,
            has_mode_selection: true,
            has_custom_levels: false,
            has_industrial_status: false,
            has_auto_mode: false,
            has_speed_control: false,
        },
    },
    VariantInfo {
        variant: Variant::DcHammer,
        id: "segmented",
        display_name: "DC Hammer",
        description: "DC-powered hammer with 5-bar battery display",
        screen: ScreenKind::HammerModes,
        features: Features {
            has_battery_display: true,
            has_segmented_display: true,
            has_mode_selection: true,
            has_custom_levels: false,
            has_industrial_status: false,
            has_auto_mode: false,
            has_speed_control: false,
        },
    },
    VariantInfo {
        variant: Variant::Industrial,
        id: "industrial",
        display_name: "Industrial",
        description: "Industrial tool with 7-segment torque display and tool lock",
        screen: ScreenKind::IndustrialTorque,
        features: Features {
            has_battery_display: true,
            has_segmented_display: false,
            has_mode_selection: false,
            has_custom_levels: true,
            has_industrial_status: true,
            has_auto_mode: false,
            has_speed_control: false,
        },
    },
    VariantInfo {
        variant: Variant::Fixing1,
        id: "fixing1",
        display_name: "Fixing 1",
        description: "Vertical industrial panel with auto mode and 3-speed control",
        screen: ScreenKind::FixingPanel,
        features: Features {
            has_battery_display: false,
            has_segmented_display: false,
            has_mode_selection: false,
            has_custom_levels: false,
            has_industrial_status: false,
            has_auto_mode: true,
            has_speed_control: true,
        },
    },
];

impl Variant {
    /// All variants in switcher order
    pub const ALL: [Variant; 4] = [
        Variant::AcHammer,
        Variant::DcHammer,
        Variant::Industrial,
        Variant::Fixing1,
    ];

    /// Position of this variant in the table
    pub const fn index(self) -> usize {
        match self {
            Variant::AcHammer => 0,
            Variant::DcHammer => 1,
            Variant::Industrial => 2,
            Variant::Fixing1 => 3,
        }
    }

    /// Variant at a switcher position
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Resolve a configuration identifier
    pub fn from_id(id: &str) -> Option<Self> {
        VARIANTS.iter().find(|v| v.id == id).map(|v| v.variant)
    }

    /// Table row for this variant
    pub fn info(self) -> &'static VariantInfo {
        &VARIANTS[self.index()]
    }

    /// Capability flags for this variant
    pub fn features(self) -> Features {
        self.info().features
    }

    /// Check a single capability
    pub fn has_feature(self, feature: Feature) -> bool {
        self.features().has(feature)
    }

    /// Screen body composition
    pub fn screen(self) -> ScreenKind {
        self.info().screen
    }

    /// Configuration identifier
    pub fn id(self) -> &'static str {
        self.info().id
    }
}
