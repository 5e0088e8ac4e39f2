//! Configuration loader with multi-source merging

use crate::{Paths, TallyConfig};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "TALLY".to_string(),
            user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "TALLY")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skip ~/.config/tally/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<TallyConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = TallyConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/tally/config.toml)
        if self.user_config {
            let paths = Paths::new();
            if let Ok(user_config_file) = paths.user_config_file()
                && user_config_file.exists()
            {
                builder = builder.add_source(
                    config::File::from(user_config_file)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // 3. Project config (tally.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Local config (tally.local.toml, gitignored)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (TALLY_SESSION__AUTO_ANSWER=true)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let tally_config: TallyConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        tally_config
            .validate()
            .context("Configuration failed validation")?;

        Ok(tally_config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default(self) -> TallyConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DisplayMode;
    use std::fs;
    use tally_types::{Locale, Operation};
    use tempfile::tempdir;

    fn loader(project_dir: &Path) -> ConfigLoader {
        ConfigLoader::new()
            .with_project_dir(project_dir)
            .with_env_prefix("TALLY_LOADER_TEST")
            .without_user_config()
    }

    #[test]
    fn test_load_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = loader(temp_dir.path())
            .load()
            .expect("Failed to load config");

        assert!(!config.session.auto_answer);
        assert!(config.session.auto_carry);
        assert_eq!(config.session.default_operation, Operation::Addition);
        assert_eq!(config.display.mode, DisplayMode::Coins);
        assert_eq!(config.display.locale, Locale::Japanese);
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        let config_content = r#"
[session]
auto_answer = true
default_operation = "subtraction"

[display]
mode = "blocks"
locale = "english"
"#;
        fs::write(project_dir.join("tally.toml"), config_content)
            .expect("Failed to write config");

        let config = loader(project_dir).load().expect("Failed to load config");

        assert!(config.session.auto_answer);
        assert!(config.session.auto_carry);
        assert_eq!(config.session.default_operation, Operation::Subtraction);
        assert_eq!(config.display.mode, DisplayMode::Blocks);
        assert_eq!(config.display.locale, Locale::English);
    }

    #[test]
    fn test_local_overrides() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("tally.toml"),
            r#"
[session]
auto_carry = true
"#,
        )
        .expect("Failed to write project config");

        fs::write(
            project_dir.join("tally.local.toml"),
            r#"
[session]
auto_carry = false
"#,
        )
        .expect("Failed to write local config");

        let config = loader(project_dir).load().expect("Failed to load config");

        // Local config should override project config
        assert!(!config.session.auto_carry);
    }

    #[test]
    fn test_division_rejected() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let project_dir = temp_dir.path();

        fs::write(
            project_dir.join("tally.toml"),
            r#"
[session]
default_operation = "division"
"#,
        )
        .expect("Failed to write config");

        assert!(loader(project_dir).load().is_err());
        assert_eq!(
            loader(project_dir).load_or_default().session.default_operation,
            Operation::Addition
        );
    }

    // Environment variables are not exercised here: the process environment
    // is shared between tests. In actual usage
    //
    // TALLY_SESSION__AUTO_ANSWER=true
    // TALLY_DISPLAY__LOCALE=english
    //
    // override the corresponding config file values.
}
