//! Long-press lock gesture
//!
//! Holding either torque step button for the hold time toggles the tool
//! lock. Releasing earlier is a tap, which steps the selection instead. The
//! two outcomes are exclusive for one physical press.
//!
//! Time is supplied by the caller as a monotonic millisecond counter. At
//! most one deadline is armed at a time; a new press replaces it.
//!
//! ```text
//!            press                 deadline reached
//!   Idle ───────────────► Pressing ────────────────► Latched
//!    ▲                      │                           │
//!    │   release (tap)      │      release (no tap)     │
//!    └──────────────────────┴───────────────────────────┘
//! ```

/// Default hold time before a press becomes a lock toggle
pub const LONG_PRESS_MS: u32 = 3000;

/// Torque step buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepButton {
    Plus,
    Minus,
}

impl StepButton {
    /// Sequence step for a tap on this button
    pub const fn delta(self) -> i8 {
        match self {
            StepButton::Plus => 1,
            StepButton::Minus => -1,
        }
    }
}

/// Gesture detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureState {
    /// No button held
    Idle,
    /// Button held, lock toggle armed
    Pressing { button: StepButton, deadline_ms: u64 },
    /// Lock toggle already fired for the button still held
    Latched { button: StepButton },
}

/// What a release means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Release {
    /// Short press: perform the step action
    Tap(StepButton),
    /// Deadline was reached at the moment of release: toggle the lock
    LongPress,
    /// Lock already toggled during this press: nothing more to do
    Consumed,
}

/// Long-press detector for the step buttons
#[derive(Debug, Clone)]
pub struct LockGesture {
    state: GestureState,
    hold_ms: u32,
}

impl Default for LockGesture {
    fn default() -> Self {
        Self::new(LONG_PRESS_MS)
    }
}

impl LockGesture {
    /// Create a detector with the given hold time
    pub const fn new(hold_ms: u32) -> Self {
        Self {
            state: GestureState::Idle,
            hold_ms,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn hold_ms(&self) -> u32 {
        self.hold_ms
    }

    /// A lock toggle is armed and has not fired yet
    pub fn is_pending(&self) -> bool {
        matches!(self.state, GestureState::Pressing { .. })
    }

    /// Button went down: arm the deadline, replacing any armed one
    pub fn press(&mut self, button: StepButton, now_ms: u64) {
        self.state = GestureState::Pressing {
            button,
            deadline_ms: now_ms.saturating_add(self.hold_ms as u64),
        };
    }

    /// Advance time
    ///
    /// Returns true exactly once per press, when the deadline is reached
    /// while the button is still held.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state {
            GestureState::Pressing {
                button,
                deadline_ms,
            } if now_ms >= deadline_ms => {
                self.state = GestureState::Latched { button };
                true
            }
            _ => false,
        }
    }

    /// Button released
    ///
    /// Only a release of the tracked button ends the gesture. Releasing any
    /// other button (or releasing with no tracked press, e.g. because the
    /// press was refused) is a tap of the released button and leaves the
    /// tracked press armed; the caller's interlock decides whether it steps.
    pub fn release(&mut self, button: StepButton, now_ms: u64) -> Release {
        let release = match self.state {
            GestureState::Pressing {
                button: held,
                deadline_ms,
            } if held == button => {
                if now_ms >= deadline_ms {
                    Release::LongPress
                } else {
                    Release::Tap(button)
                }
            }
            GestureState::Latched { button: held } if held == button => Release::Consumed,
            _ => return Release::Tap(button),
        };
        self.state = GestureState::Idle;
        release
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_is_tap() {
        let mut gesture = LockGesture::default();
        gesture.press(StepButton::Plus, 0);
        assert!(!gesture.poll(1000));
        assert_eq!(gesture.release(StepButton::Plus, 1000), Release::Tap(StepButton::Plus));
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn test_hold_fires_once() {
        let mut gesture = LockGesture::default();
        gesture.press(StepButton::Minus, 500);
        assert!(!gesture.poll(3499));
        assert!(gesture.poll(3500));
        assert!(!gesture.poll(9000));
        assert_eq!(gesture.release(StepButton::Minus, 3501), Release::Consumed);
    }

    #[test]
    fn test_release_at_deadline_without_poll() {
        let mut gesture = LockGesture::default();
        gesture.press(StepButton::Plus, 0);
        assert_eq!(gesture.release(StepButton::Plus, 3000), Release::LongPress);
        assert!(!gesture.is_pending());
    }

    #[test]
    fn test_new_press_replaces_deadline() {
        let mut gesture = LockGesture::default();
        gesture.press(StepButton::Plus, 0);
        gesture.press(StepButton::Minus, 2000);
        // First deadline would have been 3000
        assert!(!gesture.poll(3000));
        assert!(gesture.is_pending());
        assert!(gesture.poll(5000));
    }

    #[test]
    fn test_stray_release_is_tap() {
        let mut gesture = LockGesture::default();
        assert_eq!(
            gesture.release(StepButton::Minus, 10),
            Release::Tap(StepButton::Minus)
        );
    }

    #[test]
    fn test_release_of_other_button_keeps_hold() {
        let mut gesture = LockGesture::default();
        gesture.press(StepButton::Plus, 0);
        gesture.press(StepButton::Minus, 500);
        assert_eq!(gesture.release(StepButton::Plus, 1000), Release::Tap(StepButton::Plus));
        assert!(gesture.is_pending());
        assert!(gesture.poll(3500));
        assert_eq!(gesture.release(StepButton::Minus, 3600), Release::Consumed);
    }

    #[test]
    fn test_release_of_other_button_while_latched() {
        let mut gesture = LockGesture::new(100);
        gesture.press(StepButton::Minus, 0);
        assert!(gesture.poll(100));
        assert_eq!(gesture.release(StepButton::Plus, 150), Release::Tap(StepButton::Plus));
        assert_eq!(gesture.state(), GestureState::Latched { button: StepButton::Minus });
        assert_eq!(gesture.hold_ms(), 100);
    }
}
