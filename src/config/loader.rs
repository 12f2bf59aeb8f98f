use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::types::{ConfiguredLaunchMode, RunnerSettings};
use crate::resolve::parse_bool;

/// CI configuration parameter selecting the launch mode.
pub const LAUNCH_MODE_PARAM: &str = "teamcity.internal.gradle.runner.launch.mode";

/// CI configuration parameter enabling eager reads of all build properties.
pub const READ_ALL_PARAMS_PARAM: &str = "teamcity.internal.gradle.runner.read.all.params";

/// CI configuration parameter disabling the agent-local Gradle user home.
pub const USER_HOME_OVERRIDE_PARAM: &str =
    "teamcity.internal.gradle.runner.gradle.user.home.override.enabled";

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl RunnerSettings {
    /// Returns the path to the settings file.
    ///
    /// Uses `~/.config/gradle-runner/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("gradle-runner").join("config.toml")
    }

    /// Loads settings from the default file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads settings from `path`.
    ///
    /// - If the file doesn't exist, returns `RunnerSettings::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: RunnerSettings =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.static_suffix.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "static_suffix must not be empty".to_string(),
            });
        }
        if self.static_suffix.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "static_suffix '{}' must not contain a path separator",
                    self.static_suffix
                ),
            });
        }
        Ok(())
    }

    /// Apply CI configuration parameters on top of the file settings.
    ///
    /// An unrecognised launch mode selects by Gradle version.
    pub fn apply_overrides(mut self, params: &HashMap<String, String>) -> Self {
        if let Some(value) = params.get(LAUNCH_MODE_PARAM) {
            self.launch_mode = ConfiguredLaunchMode::from_param(value);
            debug!("Launch mode '{}' configured as {}", value, self.launch_mode);
        }
        self.read_all_params = bool_param(params, READ_ALL_PARAMS_PARAM, self.read_all_params);
        self.user_home_override =
            bool_param(params, USER_HOME_OVERRIDE_PARAM, self.user_home_override);
        self
    }
}

/// Boolean CI parameter, `default` when unset.
pub fn bool_param(params: &HashMap<String, String>, key: &str, default: bool) -> bool {
    params.get(key).map(|v| parse_bool(v)).unwrap_or(default)
}
