//! Display projection and rendering for PanelSim
//!
//! This crate provides:
//! - `PanelView::project`, a pure mapping from a session snapshot to lamp
//!   tones, bar counts, labels and readout glyphs
//! - 7-segment glyph table and two-digit torque readout
//! - Screen buffer with the text-mode layout of a panel view
//! - `DisplayBackend` trait for anything that can draw that screen
//!
//! # Architecture
//!
//! The core crate decides state; this crate only decides appearance. A
//! frontend takes a snapshot after each input, projects it, renders it into
//! a `Screen` and presents the screen when it is dirty:
//!
//! ```text
//! Session::snapshot ─► PanelView::project ─► Screen::render ─► present(backend)
//! ```

#![no_std]

pub mod backend;
pub mod projector;
pub mod screen;
pub mod segment;

// Re-export key types
pub use backend::{present, DisplayBackend, DisplayError};
pub use projector::{Body, Indicators, Lamp, PanelView, Tone, TopBar};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
