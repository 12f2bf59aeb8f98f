use std::fmt;

use serde::{Deserialize, Serialize};

use crate::properties::STATIC_SUFFIX;

/// Runner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerSettings {
    /// How the build is launched (default: gradle).
    #[serde(default)]
    pub launch_mode: ConfiguredLaunchMode,
    /// Read the dynamic properties file eagerly (default: false).
    /// Builds doing this cannot reuse the configuration cache.
    #[serde(default)]
    pub read_all_params: bool,
    /// Suffix of the static properties file (default: ".static").
    #[serde(default = "default_static_suffix")]
    pub static_suffix: String,
    /// Relocate the Gradle user home under the agent cache directory when
    /// the caller supplies one (default: true).
    #[serde(default = "default_true")]
    pub user_home_override: bool,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            launch_mode: ConfiguredLaunchMode::default(),
            read_all_params: false,
            static_suffix: default_static_suffix(),
            user_home_override: true,
        }
    }
}

/// Launch mode as configured, before the Gradle version is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfiguredLaunchMode {
    /// Chosen by Gradle version.
    Auto,
    #[default]
    Gradle,
    #[serde(rename = "gradle-tooling-api")]
    ToolingApi,
}

impl ConfiguredLaunchMode {
    /// Interpret the CI launch mode parameter. Empty means `gradle`; any
    /// value other than the two named modes leaves the choice to the
    /// Gradle version.
    pub fn from_param(value: &str) -> Self {
        match value {
            "" | "gradle" => Self::Gradle,
            "gradle-tooling-api" => Self::ToolingApi,
            _ => Self::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Gradle => "gradle",
            Self::ToolingApi => "gradle-tooling-api",
        }
    }
}

impl fmt::Display for ConfiguredLaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_static_suffix() -> String {
    STATIC_SUFFIX.to_string()
}

fn default_true() -> bool {
    true
}
