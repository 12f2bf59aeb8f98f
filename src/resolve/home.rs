//! Gradle user home detection.
//!
//! Gradle reads its user home from, in descending priority:
//! 1. `--gradle-user-home` / `-g` on the command line,
//! 2. the `-Dgradle.user.home` system property on the command line,
//! 3. the `GRADLE_USER_HOME` environment variable.
//!
//! Passing both the long and the short option makes Gradle fail, so the
//! first occurrence of either is taken.
//!
//! Builds that share a dependency cache get an agent-local user home under
//! the agent cache directory instead; see [`agent_local_user_home`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::args::split_equals;
use crate::error::LaunchError;
use crate::resolve::layered::first_match;

pub const USER_HOME_LONG: &str = "--gradle-user-home";
pub const USER_HOME_SHORT: &str = "-g";
pub const USER_HOME_SYSTEM_PROPERTY: &str = "-Dgradle.user.home";
pub const USER_HOME_ENV: &str = "GRADLE_USER_HOME";

/// Runner directory inside the agent cache directory.
pub const RUNNER_CACHE_DIR: &str = "jetbrains.gradle.runner";
/// Agent-local user home inside [`RUNNER_CACHE_DIR`].
pub const AGENT_LOCAL_USER_HOME_DIR: &str = "gradle.user.home";

/// Where the user home override came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSource {
    /// `--gradle-user-home` or `-g`.
    CommandLine,
    /// `-Dgradle.user.home=...`.
    SystemProperty,
    /// `GRADLE_USER_HOME`.
    Environment,
}

/// A detected user home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDetection {
    pub path: PathBuf,
    pub source: HomeSource,
}

/// Detect an override from the command line only.
pub fn detect_override<S: AsRef<str>>(tokens: &[S]) -> Option<HomeDetection> {
    detect(tokens, &[HomeSource::CommandLine, HomeSource::SystemProperty], None)
}

/// Detect the user home from tasks, parameters and the environment.
pub fn detect_user_home<S: AsRef<str>>(
    tasks: &[S],
    params: &[S],
    env: &HashMap<String, String>,
) -> Option<HomeDetection> {
    let tokens: Vec<&str> = tasks
        .iter()
        .chain(params.iter())
        .map(|item| item.as_ref())
        .collect();
    let detection = detect(
        &tokens,
        &[
            HomeSource::CommandLine,
            HomeSource::SystemProperty,
            HomeSource::Environment,
        ],
        Some(env),
    );
    if let Some(found) = &detection {
        debug!(
            "Gradle user home {} detected from {:?}",
            found.path.display(),
            found.source
        );
    }
    detection
}

fn detect<S: AsRef<str>>(
    tokens: &[S],
    tiers: &[HomeSource],
    env: Option<&HashMap<String, String>>,
) -> Option<HomeDetection> {
    first_match(tiers.iter().copied(), |tier| {
        let path = match tier {
            HomeSource::CommandLine => from_option(tokens),
            HomeSource::SystemProperty => from_system_property(tokens),
            HomeSource::Environment => env.and_then(|env| env.get(USER_HOME_ENV)).cloned(),
        };
        path.filter(|path| !path.is_empty())
    })
    .map(|hit| HomeDetection {
        path: PathBuf::from(hit.value),
        source: hit.source,
    })
}

fn from_option<S: AsRef<str>>(tokens: &[S]) -> Option<String> {
    let mut iter = tokens.iter().map(|item| item.as_ref()).peekable();
    while let Some(item) = iter.next() {
        let (key, value) = split_equals(item);
        if is_user_home_option(key) && key.len() < item.len() {
            return Some(value.to_string());
        }
        if is_user_home_option(item) {
            if let Some(next) = iter.peek() {
                return Some(next.to_string());
            }
        }
    }
    None
}

/// The last system property wins, matching the JVM.
fn from_system_property<S: AsRef<str>>(tokens: &[S]) -> Option<String> {
    tokens
        .iter()
        .map(|item| item.as_ref())
        .filter_map(|item| match split_equals(item) {
            (USER_HOME_SYSTEM_PROPERTY, value) if item.contains('=') => Some(value.to_string()),
            _ => None,
        })
        .last()
}

fn is_user_home_option(token: &str) -> bool {
    token == USER_HOME_LONG || token == USER_HOME_SHORT
}

/// Remove `--gradle-user-home` / `-g` (and their separate values) from a
/// task or parameter list.
///
/// The system property form is left alone: once the option is gone it is the
/// next-highest source and is meant to take effect.
pub fn remove_user_home_argument<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut result = Vec::with_capacity(items.len());
    let mut iter = items.iter().map(|item| item.as_ref());

    while let Some(item) = iter.next() {
        if is_user_home_option(item) {
            iter.next();
            continue;
        }
        let (key, _) = split_equals(item);
        if is_user_home_option(key) && item.contains('=') {
            continue;
        }
        result.push(item.to_string());
    }

    result
}

/// Remove `-Dgradle.user.home=...` from a task or parameter list.
pub fn remove_user_home_system_property<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.as_ref())
        .filter(|item| !(split_equals(item).0 == USER_HOME_SYSTEM_PROPERTY && item.contains('=')))
        .map(String::from)
        .collect()
}

/// `<cache_dir>/jetbrains.gradle.runner/gradle.user.home`, created if missing.
pub fn agent_local_user_home(cache_dir: &Path) -> Result<PathBuf, LaunchError> {
    let home = cache_dir
        .join(RUNNER_CACHE_DIR)
        .join(AGENT_LOCAL_USER_HOME_DIR);
    fs::create_dir_all(&home).map_err(|source| LaunchError::UserHome {
        path: home.clone(),
        source,
    })?;
    info!("Using agent-local Gradle user home {}", home.display());
    Ok(home)
}
