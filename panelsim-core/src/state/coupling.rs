//! Tool status coupling
//!
//! On tools with industrial status the kickback flag drives the safety stop:
//! kickback forces `SafetyError`, and clearing kickback releases a safety
//! stop back to `Normal`. Other variants leave the status untouched.

use super::status::ToolStatus;
use crate::variant::Features;

/// Status the tool must be in, given the coupling inputs
pub fn reconcile_tool_status(
    features: &Features,
    kickback: bool,
    status: ToolStatus,
) -> ToolStatus {
    if !features.has_industrial_status {
        return status;
    }

    if kickback {
        ToolStatus::SafetyError
    } else if status == ToolStatus::SafetyError {
        ToolStatus::Normal
    } else {
        status
    }
}
