//! Configuration types
//!
//! Session defaults, their TOML form, and the panel constants.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;

/// Default panel configuration shipped with the crate
///
/// Validated at build time by the crate's build script.
pub const EMBEDDED_CONFIG: &str = include_str!("../../panel.toml");

impl PanelConfig {
    /// Parse the configuration shipped with the crate
    pub fn embedded() -> Result<Self, ParseError> {
        parse_config(EMBEDDED_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_matches_defaults() {
        assert_eq!(PanelConfig::embedded(), Ok(PanelConfig::default()));
    }
}
