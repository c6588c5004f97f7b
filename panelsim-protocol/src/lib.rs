//! PanelSim Input Protocol
//!
//! This crate defines the events the presentation layer (the rendered device
//! screen and the simulation control panel) hands to the core. The vocabulary
//! is deliberately small and numeric: keys are carried as indices so the
//! presentation layer never needs the core's domain types.
//!
//! # Event Overview
//!
//! ```text
//! ┌─────────────┬──────────────────────────────┬──────────────────────┐
//! │ EVENT       │ TARGET                       │ MEANING              │
//! ├─────────────┼──────────────────────────────┼──────────────────────┤
//! │ Click       │ any Target                   │ discrete activation  │
//! │ PressStart  │ Plus / Minus                 │ pointer down         │
//! │ PressEnd    │ Plus / Minus                 │ pointer up           │
//! │ Slide       │ Battery / TorqueLimit / ...  │ new integer value    │
//! └─────────────┴──────────────────────────────┴──────────────────────┘
//! ```
//!
//! Pointer input on the torque buttons is reported as a `PressStart` /
//! `PressEnd` pair only. A `Click` on Plus or Minus models a keyboard-style
//! activation that never arms the long-press lock gesture.

#![no_std]
#![deny(unsafe_code)]

pub mod events;

pub use events::{InputEvent, Slider, Target};
