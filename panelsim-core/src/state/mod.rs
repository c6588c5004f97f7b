//! Panel interaction state
//!
//! The session owns every entity of a simulated panel. The submodules hold
//! the pure rules it composes: interlock, status coupling, selection
//! sequencing and the long-press gesture.

pub mod coupling;
pub mod events;
pub mod gesture;
pub mod interlock;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod status;

pub use events::Event;
pub use gesture::{LockGesture, StepButton, LONG_PRESS_MS};
pub use interlock::{is_interaction_disabled, Interlock};
pub use selection::{
    adjust_selection, full_sequence, CustomLevelKey, CustomLevels, Sequence, TorqueSelection,
};
pub use session::{Outcome, Rejection, Session};
pub use snapshot::PanelSnapshot;
pub use status::{AutoMode, HammerMode, IndStatus, IndStatusKey, SpeedLevel, ToolStatus};
