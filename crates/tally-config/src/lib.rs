//! Configuration management for Tally
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (TALLY_* prefix, highest precedence)
//! 2. tally.local.toml (gitignored, local overrides)
//! 3. tally.toml (git-tracked, classroom config)
//! 4. ~/.config/tally/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tally_types::{Locale, Operation};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Tally configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub session: SessionSettings,
    pub display: DisplaySettings,
}

/// How a practice session behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Fill the answer row from the model once the objects spell it out.
    pub auto_answer: bool,
    /// Mirror regroup/unbundle gestures into the carry row.
    pub auto_carry: bool,
    pub default_operation: Operation,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            auto_answer: false,
            auto_carry: true,
            default_operation: Operation::Addition,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub mode: DisplayMode,
    pub locale: Locale,
}

/// How counting objects are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    #[default]
    Coins,
    Blocks,
}

impl TallyConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Parse a single TOML document, without merging other sources.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML, e.g. to seed a tally.toml.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks settings the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.default_operation == Operation::Division {
            return Err(ConfigError::ValidationError(
                "session.default_operation: division has no column algorithm".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TallyConfig::default();
        assert!(!config.session.auto_answer);
        assert!(config.session.auto_carry);
        assert_eq!(config.session.default_operation, Operation::Addition);
        assert_eq!(config.display.mode, DisplayMode::Coins);
        assert_eq!(config.display.locale, Locale::Japanese);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_division() {
        let mut config = TallyConfig::default();
        config.session.default_operation = Operation::Division;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = TallyConfig::default();
        config.session.auto_answer = true;
        config.display.mode = DisplayMode::Blocks;

        let text = config.to_toml_string().expect("Failed to serialize");
        assert!(text.contains("mode = \"blocks\""));

        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("tally.toml");
        std::fs::write(&path, text).expect("Failed to write config");

        assert_eq!(
            TallyConfig::from_toml_file(&path).expect("Failed to parse"),
            config
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("tally.toml");
        std::fs::write(&path, "[display]\nlocale = \"english\"\n").expect("Failed to write");

        let config = TallyConfig::from_toml_file(&path).expect("Failed to parse");
        assert_eq!(config.display.locale, Locale::English);
        assert!(config.session.auto_carry);
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("tally.toml");
        std::fs::write(&path, "[session\n").expect("Failed to write");

        let err = TallyConfig::from_toml_file(&path).expect_err("should not parse");
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("tally.toml"));
    }
}
