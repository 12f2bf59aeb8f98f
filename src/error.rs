//! Error types for build preparation.
//!
//! Absence of an option is never an error; only I/O on the write side and
//! malformed runner settings surface here.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while reading or writing property files.
#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error("Couldn't read properties from file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Couldn't parse properties file '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Couldn't store properties to file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PropertiesError {
    /// Path of the file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Errors raised while writing or reading launcher hand-off files.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Hand-off file doesn't exist: {0}")]
    Missing(PathBuf),

    #[error("Couldn't access hand-off file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed hand-off file '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Couldn't create Gradle user home '{path}': {source}")]
    UserHome {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for build preparation.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Build configuration error: {0}")]
    Properties(#[from] PropertiesError),

    #[error("Runner settings error: {0}")]
    Config(#[from] ConfigError),

    #[error("Launcher error: {0}")]
    Launch(#[from] LaunchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_names_destination() {
        let err = PropertiesError::Write {
            path: PathBuf::from("/tmp/build.properties.static"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = RunnerError::from(err).to_string();
        assert!(text.contains("/tmp/build.properties.static"));
        assert!(text.starts_with("Build configuration error"));
    }

    #[test]
    fn user_home_error_names_directory() {
        let err = LaunchError::UserHome {
            path: PathBuf::from("/cache/gradle.user.home"),
            source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file"),
        };
        let text = RunnerError::from(err).to_string();
        assert!(text.starts_with("Launcher error"));
        assert!(text.contains("/cache/gradle.user.home"));
    }
}
