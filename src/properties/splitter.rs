//! Property splitter — build properties → cache-stable static file.
//!
//! The original build properties file stays untouched and serves as the
//! dynamic half. The static half is written next to it with a fixed suffix.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::PropertiesError;
use crate::properties::classifier::is_dynamic;
use crate::properties::format::{read_properties, write_properties, Properties};

/// Suffix appended to the build properties file name.
pub const STATIC_SUFFIX: &str = ".static";

pub const BUILD_PROPERTIES_ENV: &str = "TEAMCITY_BUILD_PROPERTIES_FILE";
pub const BUILD_PROPERTIES_SYSTEM_PROPERTY: &str = "teamcity.build.properties.file";

/// Static key naming a second, smaller configuration properties file.
pub const CONFIGURATION_PROPERTIES_KEY: &str = "teamcity.configuration.properties.file";

pub const TEST_JVM_ARGS_KEY: &str = "gradle.test.jvmargs";
pub const STACKTRACE_LOG_DIR_KEY: &str = "teamcity.build.stacktraceLogDir";
pub const CHANGED_FILES_KEY: &str = "teamcity.build.changedFiles.file";
pub const TEST_NAME_FORMAT_KEY: &str = "teamcity.internal.gradle.testNameFormat";
pub const IGNORED_SUITE_FORMAT_KEY: &str = "teamcity.internal.gradle.ignoredSuiteFormat";
pub const USE_TEST_RETRY_PLUGIN_KEY: &str = "teamcity.internal.gradle.useTestRetryPlugin";

/// Configuration values copied into the static file.
const CONFIGURATION_ALLOW_LIST: [&str; 3] = [
    TEST_NAME_FORMAT_KEY,
    IGNORED_SUITE_FORMAT_KEY,
    USE_TEST_RETRY_PLUGIN_KEY,
];

/// Defaults for keys the init script reads, so it never falls through to the
/// dynamic file for them.
const DEFAULT_VALUES: [(&str, &str); 6] = [
    (TEST_JVM_ARGS_KEY, ""),
    (USE_TEST_RETRY_PLUGIN_KEY, "true"),
    (TEST_NAME_FORMAT_KEY, ""),
    (IGNORED_SUITE_FORMAT_KEY, ""),
    (STACKTRACE_LOG_DIR_KEY, ""),
    (CHANGED_FILES_KEY, ""),
];

/// Path of the static half for `source`: same directory, suffixed file name.
pub fn static_properties_path(source: &Path, suffix: &str) -> PathBuf {
    let mut name = source
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    source.with_file_name(name)
}

/// Locate the build properties file: system property first, then environment.
pub fn locate_build_properties(
    system_properties: &HashMap<String, String>,
    env: &HashMap<String, String>,
) -> Option<PathBuf> {
    system_properties
        .get(BUILD_PROPERTIES_SYSTEM_PROPERTY)
        .or_else(|| env.get(BUILD_PROPERTIES_ENV))
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Splits build properties into a static file.
#[derive(Debug, Clone)]
pub struct PropertySplitter {
    suffix: String,
}

impl PropertySplitter {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Split the file named by the system property or environment, if any.
    ///
    /// Returns `Ok(None)` when no build properties file is configured or it
    /// does not exist.
    pub fn split_from_env(
        &self,
        system_properties: &HashMap<String, String>,
        env: &HashMap<String, String>,
        temp_dir: &Path,
    ) -> Result<Option<PathBuf>, PropertiesError> {
        let Some(source) = locate_build_properties(system_properties, env) else {
            debug!("No build properties file configured, skipping split");
            return Ok(None);
        };
        if !source.exists() {
            debug!("Build properties file {} not found, skipping split", source.display());
            return Ok(None);
        }
        self.split_file(&source, temp_dir).map(Some)
    }

    /// Write the static half of `source` and return its path.
    pub fn split_file(&self, source: &Path, temp_dir: &Path) -> Result<PathBuf, PropertiesError> {
        let properties = read_properties(source)?;
        let static_properties = self.static_subset(&properties)?;
        let destination = static_properties_path(source, &self.suffix);

        fs::create_dir_all(temp_dir).map_err(|e| PropertiesError::Write {
            path: temp_dir.to_path_buf(),
            source: e,
        })?;
        write_properties(&destination, &static_properties)?;

        info!(
            "Stored {} of {} build properties in {}",
            static_properties.len(),
            properties.len(),
            destination.display()
        );
        Ok(destination)
    }

    /// Static properties, configuration values and defaults.
    pub fn static_subset(&self, properties: &Properties) -> Result<Properties, PropertiesError> {
        let mut result: Properties = properties
            .iter()
            .filter(|(key, _)| !is_dynamic(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        add_configuration_values(&mut result, properties)?;

        for (key, value) in DEFAULT_VALUES {
            result
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }

        Ok(result)
    }
}

impl Default for PropertySplitter {
    fn default() -> Self {
        Self::new(STATIC_SUFFIX)
    }
}

/// Copy allow-listed values from the configuration properties file so the
/// init script never needs the per-build configuration parameters.
fn add_configuration_values(
    target: &mut Properties,
    properties: &Properties,
) -> Result<(), PropertiesError> {
    let Some(path) = properties
        .get(CONFIGURATION_PROPERTIES_KEY)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
    else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let configuration = read_properties(&path)?;
    for key in CONFIGURATION_ALLOW_LIST {
        if let Some(value) = configuration.get(key) {
            target.insert(key.to_string(), value.clone());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_path_appends_suffix() {
        assert_eq!(
            static_properties_path(Path::new("/tmp/build.properties"), STATIC_SUFFIX),
            PathBuf::from("/tmp/build.properties.static")
        );
    }

    #[test]
    fn system_property_beats_environment() {
        let mut props = HashMap::new();
        props.insert(BUILD_PROPERTIES_SYSTEM_PROPERTY.to_string(), "/a".to_string());
        let mut env = HashMap::new();
        env.insert(BUILD_PROPERTIES_ENV.to_string(), "/b".to_string());

        assert_eq!(locate_build_properties(&props, &env), Some(PathBuf::from("/a")));
        assert_eq!(
            locate_build_properties(&HashMap::new(), &env),
            Some(PathBuf::from("/b"))
        );
        assert_eq!(locate_build_properties(&HashMap::new(), &HashMap::new()), None);
    }

    #[test]
    fn subset_drops_dynamic_and_fills_defaults() {
        let mut props = Properties::new();
        props.insert("build.number".into(), "42".into());
        props.insert("teamcity.build.tempDir".into(), "/tmp".into());
        props.insert(TEST_JVM_ARGS_KEY.into(), "-Xmx1g".into());

        let subset = PropertySplitter::default().static_subset(&props).unwrap();
        assert!(!subset.contains_key("build.number"));
        assert_eq!(subset["teamcity.build.tempDir"], "/tmp");
        assert_eq!(subset[TEST_JVM_ARGS_KEY], "-Xmx1g");
        assert_eq!(subset[USE_TEST_RETRY_PLUGIN_KEY], "true");
        assert_eq!(subset[CHANGED_FILES_KEY], "");
    }

    #[test]
    fn missing_configuration_file_is_skipped() {
        let mut props = Properties::new();
        props.insert(
            CONFIGURATION_PROPERTIES_KEY.into(),
            "/definitely/not/here.properties".into(),
        );
        let subset = PropertySplitter::default().static_subset(&props).unwrap();
        assert_eq!(subset[TEST_NAME_FORMAT_KEY], "");
    }
}
