//! Product variant registry
//!
//! Every conditional that depends on the active tool branches on the
//! capability flags looked up here, never on variant names.

pub mod registry;

pub use registry::{Feature, Features, ScreenKind, Variant, VariantInfo, VARIANTS};
