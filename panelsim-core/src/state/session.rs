//! Panel session
//!
//! A `Session` owns every entity of one simulated panel. All changes go
//! through [`Session::apply`], which runs the direct mutation and then the
//! reconcile pass in a fixed order:
//!
//! 1. the mutation itself
//! 2. tool status against the kickback flag
//! 3. torque selection against the limit and the active custom levels
//!
//! so that every read observes a consistent state.

use panelsim_protocol::{InputEvent, Slider, Target};

use super::coupling::reconcile_tool_status;
use super::events::Event;
use super::gesture::{LockGesture, Release, StepButton};
use super::interlock::Interlock;
use super::selection::{
    adjust_selection, full_sequence, is_selectable, CustomLevelKey, CustomLevels, Sequence,
    TorqueSelection,
};
use super::snapshot::PanelSnapshot;
use super::status::{AutoMode, HammerMode, IndStatus, IndStatusKey, SpeedLevel, ToolStatus};
use crate::config::{
    PanelConfig, MAX_BATTERY_LEVEL, MAX_CYCLE_COUNT, MAX_TORQUE_LIMIT, MIN_TORQUE_LIMIT,
};
use crate::variant::{Features, Variant};

/// Why an event was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// Power off, tool status lock or industrial hard lock
    InteractionDisabled,
    /// The active variant has no such control
    Unsupported,
    /// Input referenced a key index outside the panel's tables
    UnknownTarget,
}

/// Result of handing an event to the session
///
/// Rejections are policy no-ops: the state is untouched and nothing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// State changed
    Applied,
    /// Event accepted but the state is the same (e.g. stepping at an edge)
    Unchanged,
    /// Event ignored
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// One simulated panel
#[derive(Debug, Clone)]
pub struct Session {
    config: PanelConfig,
    variant: Variant,
    power_on: bool,
    tool_status: ToolStatus,
    ind_status: IndStatus,
    battery_level: u8,
    cycle_count: u16,
    max_torque_limit: u8,
    custom_levels: CustomLevels,
    torque_selection: TorqueSelection,
    mode: HammerMode,
    auto_mode: AutoMode,
    speed: SpeedLevel,
    gesture: LockGesture,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

impl Session {
    /// Start a session from a configuration
    ///
    /// Values are expected to have passed [`PanelConfig::validate`]; the
    /// reconcile pass still runs so the session starts consistent.
    pub fn new(config: PanelConfig) -> Self {
        let mut session = Self {
            variant: config.variant,
            power_on: config.power_on,
            tool_status: config.tool_status,
            ind_status: config.ind_status,
            battery_level: config.battery_level.min(MAX_BATTERY_LEVEL),
            cycle_count: config.cycle_count.min(MAX_CYCLE_COUNT),
            max_torque_limit: config.max_torque_limit.min(MAX_TORQUE_LIMIT),
            custom_levels: config.custom_levels,
            torque_selection: config.torque_selection,
            mode: config.mode,
            auto_mode: config.auto_mode,
            speed: config.speed,
            gesture: LockGesture::new(config.timing.long_press_ms),
            config,
        };
        session.reconcile();
        session
    }

    /// Return to the configured defaults, dropping any armed gesture
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
        debug!("session reset");
    }

    // Accessors

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn features(&self) -> Features {
        self.variant.features()
    }

    pub fn is_powered(&self) -> bool {
        self.power_on
    }

    pub fn tool_status(&self) -> ToolStatus {
        self.tool_status
    }

    pub fn ind_status(&self) -> IndStatus {
        self.ind_status
    }

    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    pub fn cycle_count(&self) -> u16 {
        self.cycle_count
    }

    pub fn max_torque_limit(&self) -> u8 {
        self.max_torque_limit
    }

    pub fn custom_levels(&self) -> CustomLevels {
        self.custom_levels
    }

    pub fn torque_selection(&self) -> TorqueSelection {
        self.torque_selection
    }

    pub fn mode(&self) -> HammerMode {
        self.mode
    }

    pub fn auto_mode(&self) -> AutoMode {
        self.auto_mode
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    pub fn gesture(&self) -> &LockGesture {
        &self.gesture
    }

    // Derived flags

    /// Current interlock inputs
    pub fn interlock(&self) -> Interlock {
        Interlock::evaluate(
            self.power_on,
            self.tool_status,
            &self.features(),
            &self.ind_status,
        )
    }

    pub fn is_interaction_disabled(&self) -> bool {
        self.interlock().is_disabled()
    }

    /// Tool status is `Error` or `SafetyError`
    pub fn is_tool_locked(&self) -> bool {
        self.tool_status.is_tool_locked()
    }

    /// Cycle threshold reached or maintenance flagged manually
    pub fn is_maintenance_needed(&self) -> bool {
        self.cycle_count >= self.config.timing.maintenance_cycle_threshold
            || self.ind_status.maintenance
    }

    /// Selection sequence for the current limit and custom levels
    pub fn sequence(&self) -> Sequence {
        full_sequence(self.max_torque_limit, &self.custom_levels)
    }

    /// Consistent view for the presentation layer
    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            variant: self.variant,
            power_on: self.power_on,
            tool_status: self.tool_status,
            ind_status: self.ind_status,
            battery_level: self.battery_level,
            cycle_count: self.cycle_count,
            max_torque_limit: self.max_torque_limit,
            custom_levels: self.custom_levels,
            torque_selection: self.torque_selection,
            mode: self.mode,
            auto_mode: self.auto_mode,
            speed: self.speed,
            interaction_disabled: self.is_interaction_disabled(),
            maintenance_needed: self.is_maintenance_needed(),
            tool_locked: self.is_tool_locked(),
            lock_gesture_pending: self.gesture.is_pending(),
        }
    }

    // Event application

    /// Apply one event, then reconcile
    pub fn apply(&mut self, event: Event) -> Outcome {
        if let Err(reason) = self.admit(event) {
            debug!("rejected {}: {}", event, reason);
            return Outcome::Rejected(reason);
        }

        let before = self.snapshot();
        self.mutate(event);
        self.reconcile();

        if self.snapshot() == before {
            Outcome::Unchanged
        } else {
            trace!("applied {}", event);
            Outcome::Applied
        }
    }

    /// Variant capability and interlock gate
    fn admit(&self, event: Event) -> Result<(), Rejection> {
        if event.is_simulation_input() {
            return Ok(());
        }
        if let Some(feature) = event.required_feature() {
            if !self.variant.has_feature(feature) {
                return Err(Rejection::Unsupported);
            }
        }
        // Clearing kickback is the way out of a safety stop
        let clears_kickback = event == Event::ToggleIndStatus(IndStatusKey::Kickback)
            && self.ind_status.kickback;
        if event.is_interlocked() && !clears_kickback && self.is_interaction_disabled() {
            return Err(Rejection::InteractionDisabled);
        }
        Ok(())
    }

    fn mutate(&mut self, event: Event) {
        match event {
            Event::TogglePower => {
                self.power_on = !self.power_on;
                debug!("power {}", self.power_on);
            }
            Event::SelectVariant(variant) => {
                self.variant = variant;
            }
            Event::SetToolStatus(status) => {
                self.tool_status = status;
            }
            Event::SetMaxTorqueLimit(limit) => {
                if limit > MAX_TORQUE_LIMIT {
                    warn!("torque limit {} clamped to {}", limit, MAX_TORQUE_LIMIT);
                }
                self.max_torque_limit = limit.clamp(MIN_TORQUE_LIMIT, MAX_TORQUE_LIMIT);
            }
            Event::SetBatteryLevel(level) => {
                if level > MAX_BATTERY_LEVEL {
                    warn!("battery level {} clamped to {}", level, MAX_BATTERY_LEVEL);
                }
                self.battery_level = level.min(MAX_BATTERY_LEVEL);
            }
            Event::SetCycleCount(count) => {
                if count > MAX_CYCLE_COUNT {
                    warn!("cycle count {} clamped to {}", count, MAX_CYCLE_COUNT);
                }
                self.cycle_count = count.min(MAX_CYCLE_COUNT);
            }

            Event::ToggleCustomLevel(key) => {
                let active = self.custom_levels.toggle(key);
                if !active && self.torque_selection == TorqueSelection::Custom(key) {
                    self.torque_selection = TorqueSelection::Numeric(self.max_torque_limit);
                }
            }

            Event::ToggleIndStatus(key) => {
                self.ind_status.toggle(key);
            }
            Event::SelectMode(mode) => {
                self.mode = mode;
            }
            Event::StepTorque(delta) => {
                let sequence = self.sequence();
                self.torque_selection = adjust_selection(self.torque_selection, delta, &sequence);
            }
            Event::ToggleAutoMode => {
                self.auto_mode = self.auto_mode.toggled();
            }
            Event::CycleSpeed => {
                self.speed = self.speed.cycled();
            }
            Event::SelectSpeed(level) => {
                self.speed = level;
            }

            Event::ToggleLock => {
                self.ind_status.locked = !self.ind_status.locked;
                debug!("tool lock {}", self.ind_status.locked);
            }
        }
    }

    fn reconcile(&mut self) {
        let status = reconcile_tool_status(
            &self.features(),
            self.ind_status.kickback,
            self.tool_status,
        );
        if status != self.tool_status {
            debug!("status {} forced to {}", self.tool_status, status);
            self.tool_status = status;
        }

        if !is_selectable(
            self.torque_selection,
            self.max_torque_limit,
            &self.custom_levels,
        ) {
            trace!("selection {} reset to limit", self.torque_selection);
            self.torque_selection = TorqueSelection::Numeric(self.max_torque_limit);
        }
    }

    // Operations

    pub fn toggle_power(&mut self) -> Outcome {
        self.apply(Event::TogglePower)
    }

    pub fn select_variant(&mut self, variant: Variant) -> Outcome {
        self.apply(Event::SelectVariant(variant))
    }

    pub fn set_tool_status(&mut self, status: ToolStatus) -> Outcome {
        self.apply(Event::SetToolStatus(status))
    }

    pub fn set_max_torque_limit(&mut self, limit: u8) -> Outcome {
        self.apply(Event::SetMaxTorqueLimit(limit))
    }

    pub fn set_battery_level(&mut self, level: u8) -> Outcome {
        self.apply(Event::SetBatteryLevel(level))
    }

    pub fn set_cycle_count(&mut self, count: u16) -> Outcome {
        self.apply(Event::SetCycleCount(count))
    }

    /// Flip an industrial indicator
    ///
    /// Rejected while interaction is disabled, except clearing an active
    /// kickback.
    pub fn toggle_ind_status(&mut self, key: IndStatusKey) -> Outcome {
        self.apply(Event::ToggleIndStatus(key))
    }

    /// Flip a custom level's activation
    ///
    /// Not gated by the interlock. Deactivating the selected level moves the
    /// selection to the torque limit.
    pub fn toggle_custom_level_activation(&mut self, key: CustomLevelKey) -> Outcome {
        self.apply(Event::ToggleCustomLevel(key))
    }

    pub fn select_mode(&mut self, mode: HammerMode) -> Outcome {
        self.apply(Event::SelectMode(mode))
    }

    /// Step the torque selection; saturates at either end of the sequence
    pub fn step_torque(&mut self, delta: i8) -> Outcome {
        self.apply(Event::StepTorque(delta))
    }

    pub fn toggle_auto_mode(&mut self) -> Outcome {
        self.apply(Event::ToggleAutoMode)
    }

    pub fn cycle_speed(&mut self) -> Outcome {
        self.apply(Event::CycleSpeed)
    }

    pub fn select_speed(&mut self, level: SpeedLevel) -> Outcome {
        self.apply(Event::SelectSpeed(level))
    }

    // Lock gesture

    /// Step button went down
    ///
    /// Arms the long-press deadline. Refused when power is off or the tool
    /// is status-locked; the industrial hard lock does not block it.
    pub fn press_start(&mut self, button: StepButton, now_ms: u64) -> Outcome {
        if !self.features().has_industrial_status {
            return Outcome::Rejected(Rejection::Unsupported);
        }
        if !self.interlock().allows_lock_gesture() {
            debug!("lock gesture refused");
            return Outcome::Rejected(Rejection::InteractionDisabled);
        }
        self.gesture.press(button, now_ms);
        trace!("lock gesture armed at {}", now_ms);
        Outcome::Applied
    }

    /// Step button released
    ///
    /// Before the deadline this is a tap and steps the selection (subject to
    /// the interlock). After the deadline it only completes the lock toggle.
    pub fn press_end(&mut self, button: StepButton, now_ms: u64) -> Outcome {
        match self.gesture.release(button, now_ms) {
            Release::Tap(button) => self.apply(Event::StepTorque(button.delta())),
            Release::LongPress => self.apply(Event::ToggleLock),
            Release::Consumed => Outcome::Unchanged,
        }
    }

    /// Discrete activation of a step button
    ///
    /// Does nothing while a long press is pending. Once the long press has
    /// fired the button no longer counts as pending, so a click that arrives
    /// while it is still held steps normally.
    pub fn click_step(&mut self, delta: i8) -> Outcome {
        if self.gesture.is_pending() {
            return Outcome::Unchanged;
        }
        self.apply(Event::StepTorque(delta))
    }

    /// Advance time, firing a due long press
    pub fn tick(&mut self, now_ms: u64) -> Outcome {
        if self.gesture.poll(now_ms) {
            self.apply(Event::ToggleLock)
        } else {
            Outcome::Unchanged
        }
    }

    /// Dispatch a raw input event
    ///
    /// Time is advanced first, so a long press that came due before this
    /// event is fired ahead of it. The result is `Applied` when either the
    /// long press or the input itself changed the state. Press gestures are
    /// only tracked on the step buttons.
    pub fn handle_input(&mut self, input: InputEvent, now_ms: u64) -> Outcome {
        let fired = self.tick(now_ms);

        let outcome = match input {
            InputEvent::Click(target) => self.click(target),
            InputEvent::PressStart(target) => match step_button(target) {
                Some(button) => self.press_start(button, now_ms),
                None => Outcome::Rejected(Rejection::Unsupported),
            },
            InputEvent::PressEnd(target) => match step_button(target) {
                Some(button) => self.press_end(button, now_ms),
                None => Outcome::Rejected(Rejection::Unsupported),
            },
            InputEvent::Slide(slider, value) => self.slide(slider, value),
        };

        if fired.is_applied() {
            Outcome::Applied
        } else {
            outcome
        }
    }

    fn click(&mut self, target: Target) -> Outcome {
        let event = match target {
            Target::Power => Some(Event::TogglePower),
            Target::Variant(i) => Variant::from_index(i).map(Event::SelectVariant),
            Target::ToolStatus(i) => ToolStatus::from_index(i).map(Event::SetToolStatus),
            Target::Indicator(i) => IndStatusKey::from_index(i).map(Event::ToggleIndStatus),
            Target::CustomLevel(i) => CustomLevelKey::from_index(i).map(Event::ToggleCustomLevel),
            Target::ModeMax => Some(Event::SelectMode(HammerMode::Max)),
            Target::ModeSoft => Some(Event::SelectMode(HammerMode::Soft)),
            Target::Plus | Target::Minus => return self.click_step(target.step_delta()),
            Target::AutoMode => Some(Event::ToggleAutoMode),
            Target::Speed => Some(Event::CycleSpeed),
            Target::SpeedLevel(n) => SpeedLevel::new(n).map(Event::SelectSpeed),
        };

        match event {
            Some(event) => self.apply(event),
            None => {
                debug!("unknown target {}", target);
                Outcome::Rejected(Rejection::UnknownTarget)
            }
        }
    }

    fn slide(&mut self, slider: Slider, value: u16) -> Outcome {
        let narrow = |v: u16| v.min(u8::MAX as u16) as u8;
        match slider {
            Slider::Battery => self.apply(Event::SetBatteryLevel(narrow(value))),
            Slider::TorqueLimit => self.apply(Event::SetMaxTorqueLimit(narrow(value))),
            Slider::CycleCount => self.apply(Event::SetCycleCount(value)),
        }
    }
}

fn step_button(target: Target) -> Option<StepButton> {
    if !target.is_step() {
        return None;
    }
    if target.step_delta() > 0 {
        Some(StepButton::Plus)
    } else {
        Some(StepButton::Minus)
    }
}
