//! Board-agnostic interaction model for power-tool HMI panels
//!
//! This crate contains all panel logic that does not depend on how the
//! device screen is drawn:
//!
//! - Variant registry (which controls and displays each tool exposes)
//! - Interlock evaluation (power, fault lock, industrial hard lock)
//! - Tool status state machine and its kickback coupling
//! - Torque selection sequencing (numeric range plus custom presets)
//! - Long-press lock gesture detection
//! - Session state with deterministic reconciliation
//! - Configuration type definitions and parsing

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod state;
pub mod variant;

pub use state::{Event, Outcome, PanelSnapshot, Rejection, Session};
pub use variant::{Features, Variant};
