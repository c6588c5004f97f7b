//! Display state projection
//!
//! Pure mapping from a session snapshot to what the device screen shows:
//! lamp tones, bar counts, labels and readout glyphs. Nothing here mutates
//! state or decides policy.

use panelsim_core::config::{BATTERY_CRITICAL_LEVEL, BATTERY_WARNING_LEVEL};
use panelsim_core::state::{AutoMode, HammerMode, SpeedLevel, ToolStatus, TorqueSelection};
use panelsim_core::variant::ScreenKind;
use panelsim_core::PanelSnapshot;

use crate::segment::{readout, readout_segments};

/// Number of bars on a segmented top bar
pub const SEGMENT_BARS: usize = 5;

/// Lamp colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    Off,
    Green,
    Yellow,
    Red,
    White,
    Blue,
}

impl Tone {
    /// Three-letter code for text-mode displays
    pub const fn code(self) -> &'static str {
        match self {
            Tone::Off => "---",
            Tone::Green => "GRN",
            Tone::Yellow => "YEL",
            Tone::Red => "RED",
            Tone::White => "WHT",
            Tone::Blue => "BLU",
        }
    }

    pub fn is_lit(self) -> bool {
        self != Tone::Off
    }
}

/// A lamp that may blink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lamp {
    pub tone: Tone,
    pub blink: bool,
}

impl Lamp {
    pub const OFF: Lamp = Lamp {
        tone: Tone::Off,
        blink: false,
    };

    pub const fn steady(tone: Tone) -> Self {
        Self { tone, blink: false }
    }
}

/// Top bar of the device screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopBar {
    /// Single bar coloured by tool status, with a label
    Solid { lamp: Lamp, label: &'static str },
    /// Five bars: status override, or battery level when normal
    Segmented([Lamp; SEGMENT_BARS]),
}

/// Industrial indicator row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    pub lock: Tone,
    pub kickback: Tone,
    pub battery: Tone,
    pub maintenance: Tone,
    pub nfc: Tone,
}

/// Screen body, chosen by the variant's screen kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Body {
    /// MAX / SOFT mode buttons
    Modes {
        active: HammerMode,
        speed_percent: u8,
        disabled: bool,
    },
    /// Indicators and the two-digit torque readout
    Torque {
        indicators: Indicators,
        selection: TorqueSelection,
        digits: [char; 2],
        segments: [u8; 2],
        disabled: bool,
    },
    /// Auto mode lamps and speed level
    Fixing {
        auto_mode: AutoMode,
        speed: SpeedLevel,
        disabled: bool,
    },
}

/// Everything the device screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelView {
    pub top: TopBar,
    pub body: Body,
    /// `SYSTEM LOCKED` banner over the body
    pub lock_overlay: bool,
    pub power_led: Tone,
    /// Body is greyed out while unpowered
    pub dimmed: bool,
    /// Battery percentage, on variants with a battery readout
    pub battery: Option<u8>,
}

impl PanelView {
    /// Project a snapshot
    pub fn project(snapshot: &PanelSnapshot) -> Self {
        let features = snapshot.features();

        let top = if features.has_segmented_display {
            TopBar::Segmented(segmented_bars(snapshot))
        } else {
            solid_bar(snapshot)
        };

        let disabled = snapshot.interaction_disabled;
        let body = match snapshot.variant.screen() {
            ScreenKind::HammerModes => Body::Modes {
                active: snapshot.mode,
                speed_percent: snapshot.mode.speed_percent(),
                disabled,
            },
            ScreenKind::IndustrialTorque => Body::Torque {
                indicators: indicators(snapshot),
                selection: snapshot.torque_selection,
                digits: readout(snapshot.torque_selection),
                segments: readout_segments(snapshot.torque_selection),
                disabled,
            },
            ScreenKind::FixingPanel => Body::Fixing {
                auto_mode: snapshot.auto_mode,
                speed: snapshot.speed,
                disabled,
            },
        };

        Self {
            top,
            body,
            lock_overlay: !features.has_industrial_status
                && snapshot.power_on
                && snapshot.tool_locked,
            power_led: if snapshot.power_on { Tone::Green } else { Tone::Red },
            dimmed: !snapshot.power_on,
            battery: features
                .has_battery_display
                .then_some(snapshot.battery_level),
        }
    }
}

/// Lamp for a tool status
pub fn status_lamp(status: ToolStatus) -> Lamp {
    match status {
        ToolStatus::Normal => Lamp::steady(Tone::Green),
        ToolStatus::Warning => Lamp::steady(Tone::Yellow),
        ToolStatus::Error => Lamp::steady(Tone::Red),
        ToolStatus::SafetyError => Lamp {
            tone: Tone::Red,
            blink: true,
        },
    }
}

/// Label for a tool status
pub const fn status_label(status: ToolStatus) -> &'static str {
    match status {
        ToolStatus::Normal => "NORMAL",
        ToolStatus::Warning => "WARNING",
        ToolStatus::Error => "ERROR",
        ToolStatus::SafetyError => "SAFETY STOP",
    }
}

fn solid_bar(snapshot: &PanelSnapshot) -> TopBar {
    if !snapshot.power_on {
        return TopBar::Solid {
            lamp: Lamp::OFF,
            label: "OFF",
        };
    }
    TopBar::Solid {
        lamp: status_lamp(snapshot.tool_status),
        label: status_label(snapshot.tool_status),
    }
}

/// Lit bar count and tone for a battery level
pub fn battery_bars(level: u8) -> (usize, Tone) {
    match level {
        0 => (0, Tone::Red),
        l if l <= BATTERY_CRITICAL_LEVEL => (1, Tone::Red),
        l if l <= BATTERY_WARNING_LEVEL => (1, Tone::Yellow),
        l if l <= 40 => (2, Tone::Green),
        l if l <= 60 => (3, Tone::Green),
        l if l <= 80 => (4, Tone::Green),
        _ => (5, Tone::Green),
    }
}

fn segmented_bars(snapshot: &PanelSnapshot) -> [Lamp; SEGMENT_BARS] {
    if !snapshot.power_on {
        return [Lamp::OFF; SEGMENT_BARS];
    }
    if snapshot.tool_status != ToolStatus::Normal {
        return [status_lamp(snapshot.tool_status); SEGMENT_BARS];
    }

    let (lit, tone) = battery_bars(snapshot.battery_level);
    core::array::from_fn(|i| if i < lit { Lamp::steady(tone) } else { Lamp::OFF })
}

/// Low battery indicator tone, off when the level is fine
pub fn battery_indicator_tone(level: u8) -> Tone {
    if level <= BATTERY_CRITICAL_LEVEL {
        Tone::Red
    } else if level <= BATTERY_WARNING_LEVEL {
        Tone::Yellow
    } else {
        Tone::Off
    }
}

/// Control-panel battery slider track tone
pub fn battery_slider_tone(level: u8) -> Tone {
    match battery_indicator_tone(level) {
        Tone::Off => Tone::Green,
        tone => tone,
    }
}

fn indicators(snapshot: &PanelSnapshot) -> Indicators {
    let flag = |on: bool, tone: Tone| if on { tone } else { Tone::Off };
    Indicators {
        lock: flag(snapshot.ind_status.locked, Tone::White),
        kickback: flag(snapshot.ind_status.kickback, Tone::Red),
        battery: battery_indicator_tone(snapshot.battery_level),
        maintenance: flag(snapshot.maintenance_needed, Tone::Yellow),
        nfc: flag(snapshot.ind_status.nfc, Tone::Blue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelsim_core::state::IndStatusKey;
    use panelsim_core::{Session, Variant};

    fn session(variant: Variant) -> Session {
        let mut s = Session::default();
        s.select_variant(variant);
        s
    }

    #[test]
    fn test_battery_bars() {
        assert_eq!(battery_bars(0), (0, Tone::Red));
        assert_eq!(battery_bars(1), (1, Tone::Red));
        assert_eq!(battery_bars(20), (1, Tone::Yellow));
        assert_eq!(battery_bars(21), (2, Tone::Green));
        assert_eq!(battery_bars(60), (3, Tone::Green));
        assert_eq!(battery_bars(80), (4, Tone::Green));
        assert_eq!(battery_bars(100), (5, Tone::Green));
    }

    #[test]
    fn test_segmented_battery_display() {
        let mut s = session(Variant::DcHammer);
        s.set_battery_level(50);
        let view = PanelView::project(&s.snapshot());
        let TopBar::Segmented(bars) = view.top else {
            panic!("expected segmented bar");
        };
        let lit = bars.iter().filter(|b| b.tone.is_lit()).count();
        assert_eq!(lit, 3);
    }

    #[test]
    fn test_segmented_status_override() {
        let mut s = session(Variant::DcHammer);
        s.set_tool_status(ToolStatus::SafetyError);
        let view = PanelView::project(&s.snapshot());
        assert_eq!(
            view.top,
            TopBar::Segmented([Lamp {
                tone: Tone::Red,
                blink: true
            }; SEGMENT_BARS])
        );
        assert!(view.lock_overlay);
    }

    #[test]
    fn test_solid_bar() {
        let mut s = session(Variant::AcHammer);
        let view = PanelView::project(&s.snapshot());
        assert_eq!(
            view.top,
            TopBar::Solid {
                lamp: Lamp::steady(Tone::Green),
                label: "NORMAL"
            }
        );

        s.toggle_power();
        let view = PanelView::project(&s.snapshot());
        assert_eq!(
            view.top,
            TopBar::Solid {
                lamp: Lamp::OFF,
                label: "OFF"
            }
        );
        assert_eq!(view.power_led, Tone::Red);
        assert!(view.dimmed);
        // Overlay only shows while powered
        s.set_tool_status(ToolStatus::Error);
        assert!(!PanelView::project(&s.snapshot()).lock_overlay);
    }

    #[test]
    fn test_industrial_body() {
        let mut s = session(Variant::Industrial);
        s.toggle_ind_status(IndStatusKey::Nfc);
        s.set_battery_level(10);
        s.step_torque(1);

        let view = PanelView::project(&s.snapshot());
        let Body::Torque {
            indicators,
            digits,
            disabled,
            ..
        } = view.body
        else {
            panic!("expected torque body");
        };
        assert_eq!(indicators.nfc, Tone::Blue);
        assert_eq!(indicators.battery, Tone::Yellow);
        assert_eq!(indicators.lock, Tone::Off);
        assert_eq!(digits, ['C', '1']);
        assert!(!disabled);
        // No overlay on industrial tools
        s.toggle_ind_status(IndStatusKey::Kickback);
        assert!(!PanelView::project(&s.snapshot()).lock_overlay);
    }

    #[test]
    fn test_mode_body() {
        let mut s = session(Variant::AcHammer);
        s.select_mode(HammerMode::Soft);
        let view = PanelView::project(&s.snapshot());
        assert_eq!(
            view.body,
            Body::Modes {
                active: HammerMode::Soft,
                speed_percent: 70,
                disabled: false
            }
        );
    }

    #[test]
    fn test_slider_tone() {
        assert_eq!(battery_slider_tone(0), Tone::Red);
        assert_eq!(battery_slider_tone(15), Tone::Yellow);
        assert_eq!(battery_slider_tone(85), Tone::Green);
    }
}
