//! Hand-off files — values the in-process launcher reads back.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::LaunchError;

pub const TASKS_FILE: &str = "teamcity.gradle.tasks";
pub const PARAMS_FILE: &str = "teamcity.gradle.config.parameters";
pub const JVM_ARGS_FILE: &str = "teamcity.gradle.jvm.parameters";
pub const ENV_FILE: &str = "teamcity.gradle.env.parameters";

/// Everything written before launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandOff {
    pub tasks: Vec<String>,
    pub params: Vec<String>,
    pub jvm_args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl HandOff {
    /// Write all four files into `dir` (created if missing).
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, LaunchError> {
        fs::create_dir_all(dir).map_err(|e| LaunchError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        Ok(vec![
            write_json(&dir.join(TASKS_FILE), &self.tasks)?,
            write_json(&dir.join(PARAMS_FILE), &self.params)?,
            write_json(&dir.join(JVM_ARGS_FILE), &self.jvm_args)?,
            write_json(&dir.join(ENV_FILE), &self.env)?,
        ])
    }

    /// Read all four files back from `dir`.
    pub fn read_from(dir: &Path) -> Result<Self, LaunchError> {
        Ok(Self {
            tasks: read_json(&dir.join(TASKS_FILE))?,
            params: read_json(&dir.join(PARAMS_FILE))?,
            jvm_args: read_json(&dir.join(JVM_ARGS_FILE))?,
            env: read_json(&dir.join(ENV_FILE))?,
        })
    }
}

/// Serialize `value` as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf, LaunchError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| LaunchError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, json).map_err(|e| LaunchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

/// Deserialize a hand-off file. A missing file is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LaunchError> {
    if !path.exists() {
        return Err(LaunchError::Missing(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| LaunchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| LaunchError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn env_is_written_with_sorted_keys() {
        let dir = TempDir::new().unwrap();
        let mut env = BTreeMap::new();
        env.insert("ZED".to_string(), "1".to_string());
        env.insert("ALPHA".to_string(), "2".to_string());

        let path = write_json(&dir.path().join(ENV_FILE), &env).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.find("ALPHA").unwrap() < text.find("ZED").unwrap());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = HandOff::read_from(dir.path()).unwrap_err();
        assert!(matches!(err, LaunchError::Missing(ref p) if p.ends_with(TASKS_FILE)));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TASKS_FILE), "{not json").unwrap();
        let err = read_json::<Vec<String>>(&dir.path().join(TASKS_FILE)).unwrap_err();
        assert!(matches!(err, LaunchError::Json { .. }));
    }

    #[test]
    fn written_files_read_back() {
        let dir = TempDir::new().unwrap();
        let handoff = HandOff {
            tasks: vec!["clean".into(), "build".into()],
            params: vec!["--info".into()],
            jvm_args: vec!["-Xmx1g".into()],
            env: BTreeMap::new(),
        };
        let written = handoff.write_to(&dir.path().join("nested")).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(HandOff::read_from(&dir.path().join("nested")).unwrap(), handoff);
    }
}
