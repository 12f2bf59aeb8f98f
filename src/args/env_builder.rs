//! Environment builder — all env vars for the build in one place.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::properties::BUILD_PROPERTIES_ENV;
use crate::resolve::home::USER_HOME_ENV;

/// Builder for environment variables passed to the launched build.
///
/// Later additions override earlier ones.
#[derive(Debug, Clone)]
pub struct EnvSet {
    vars: BTreeMap<String, String>,
}

impl EnvSet {
    /// Create an empty environment set.
    pub fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Inherited agent environment.
    pub fn with_base(mut self, base: &HashMap<String, String>) -> Self {
        self.vars
            .extend(base.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Resolved Gradle user home, if any.
    pub fn with_user_home(mut self, user_home: Option<&Path>) -> Self {
        if let Some(home) = user_home {
            self.vars
                .insert(USER_HOME_ENV.into(), home.display().to_string());
        }
        self
    }

    /// Build properties file the init script reads.
    pub fn with_build_properties(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.vars
                .insert(BUILD_PROPERTIES_ENV.into(), path.display().to_string());
        }
        self
    }

    /// Build the final environment, sorted by name.
    pub fn build(self) -> BTreeMap<String, String> {
        self.vars
    }
}

impl Default for EnvSet {
    fn default() -> Self {
        Self::new()
    }
}
