//! Input events from the presentation layer

/// Control targeted by a gesture
///
/// Keyed controls carry a zero-based index into the panel's fixed ordering
/// (variant buttons, status buttons, indicator toggles, custom levels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// Power ON/OFF button
    Power,
    /// Variant switcher button (index into the variant table)
    Variant(u8),
    /// Tool status simulation button (0 normal, 1 warning, 2 error, 3 safety)
    ToolStatus(u8),
    /// Industrial indicator toggle (0 lock, 1 kickback, 2 maintenance, 3 NFC)
    Indicator(u8),
    /// Custom torque level activation switch (0 = C1)
    CustomLevel(u8),
    /// Hammer MAX mode button
    ModeMax,
    /// Hammer SOFT mode button
    ModeSoft,
    /// Torque increment button
    Plus,
    /// Torque decrement button
    Minus,
    /// Fixing panel MODE button
    AutoMode,
    /// Fixing panel SPEED button
    Speed,
    /// Fixing panel direct speed level button (1-3)
    SpeedLevel(u8),
}

impl Target {
    /// Returns true if this is one of the torque step buttons
    pub fn is_step(&self) -> bool {
        matches!(self, Target::Plus | Target::Minus)
    }

    /// Returns the step direction as a signed delta (-1, 0, or +1)
    pub fn step_delta(&self) -> i8 {
        match self {
            Target::Plus => 1,
            Target::Minus => -1,
            _ => 0,
        }
    }
}

/// Range-style simulation inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slider {
    /// Battery level, percent (0-100)
    Battery,
    /// Maximum torque limit (0-99)
    TorqueLimit,
    /// Simulated usage cycle count (0-12000)
    CycleCount,
}

/// Gesture or value event delivered to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Discrete activation of a control
    Click(Target),
    /// Pointer went down on a control
    PressStart(Target),
    /// Pointer released from a control
    PressEnd(Target),
    /// Slider moved to a new value
    Slide(Slider, u16),
}
