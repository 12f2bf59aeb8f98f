//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use gradle_runner::properties::{write_properties, Properties};
use tempfile::TempDir;

/// Owned strings from literals.
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// String map from literal pairs.
pub fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Sorted properties from literal pairs.
pub fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Write `gradle.properties` with `content` into `dir` (created if missing).
pub fn gradle_properties(dir: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create dir");
    let path = dir.join("gradle.properties");
    fs::write(&path, content).expect("Failed to write gradle.properties");
    path
}

/// A project directory and a user home, both empty.
pub struct Workspace {
    pub root: TempDir,
    pub project: PathBuf,
    pub home: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let project = root.path().join("project");
        let home = root.path().join("home");
        fs::create_dir_all(&project).expect("Failed to create project dir");
        fs::create_dir_all(&home).expect("Failed to create home dir");
        Self {
            root,
            project,
            home,
        }
    }

    /// Write a build properties file under the workspace root.
    pub fn build_properties(&self, pairs: &[(&str, &str)]) -> PathBuf {
        let path = self.root.path().join("build.properties");
        write_properties(&path, &props(pairs)).expect("Failed to write build properties");
        path
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.path().join("buildTmp")
    }
}
