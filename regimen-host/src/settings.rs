//! Settings loading
//!
//! Reads [`FlowSettings`] from a TOML document:
//!
//! ```toml
//! switch_game_mode = true
//! follow_host_pause = false
//! finish_banner_s = 8
//! ```
//!
//! Missing keys keep their defaults; unknown keys are rejected so typos do
//! not go unnoticed.

use std::fs;
use std::path::Path;

use regimen_core::config::FlowSettings;
use thiserror::Error;

/// Settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read
    #[error("cannot read settings: {0}")]
    Read(#[from] std::io::Error),
    /// The document is not valid settings TOML
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parse settings from TOML text
pub fn parse_settings(input: &str) -> Result<FlowSettings, SettingsError> {
    Ok(toml::from_str(input)?)
}

/// Read and parse a settings file
pub fn load_settings(path: impl AsRef<Path>) -> Result<FlowSettings, SettingsError> {
    let text = fs::read_to_string(path)?;
    parse_settings(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, FlowSettings::default());
    }

    #[test]
    fn test_partial_document() {
        let settings = parse_settings("follow_host_pause = false\nfinish_banner_s = 8\n").unwrap();
        assert!(settings.switch_game_mode);
        assert!(!settings.follow_host_pause);
        assert_eq!(settings.finish_banner_s, 8);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_settings("switch_gamemode = false").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings"));
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(matches!(
            parse_settings("finish_banner_s = \"soon\""),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings("/nonexistent/regimen/settings.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Read(_)));
        assert!(err.to_string().starts_with("cannot read settings"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
