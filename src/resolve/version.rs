//! Gradle version parsing and launch-mode selection.

use std::cmp::Ordering;
use std::fmt;

use crate::config::ConfiguredLaunchMode;

/// First version where the configuration cache options lost the `unsafe` prefix.
const STABLE_CONFIGURATION_CACHE: GradleVersion = GradleVersion::release(8, 1, 0);

/// First version launched through the Tooling API.
const TOOLING_API_SINCE: GradleVersion = GradleVersion::release(8, 0, 0);

/// A Gradle version such as `8.1`, `7.6.4` or `8.10-rc-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradleVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Anything after the first `-` (`rc-1`, `milestone-2`, snapshot stamps).
    pub qualifier: Option<String>,
}

impl GradleVersion {
    const fn release(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: None,
        }
    }

    /// Parse `X.Y[.Z][-qualifier]`. Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (numbers, qualifier) = match text.split_once('-') {
            Some((numbers, qualifier)) => (numbers, Some(qualifier.to_string())),
            None => (text, None),
        };

        let parts = numbers
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;

        match parts.as_slice() {
            [major, minor] => Some(Self {
                major: *major,
                minor: *minor,
                patch: 0,
                qualifier,
            }),
            [major, minor, patch] => Some(Self {
                major: *major,
                minor: *minor,
                patch: *patch,
                qualifier,
            }),
            _ => None,
        }
    }

    /// `org.gradle.configuration-cache` is honoured (8.1 and newer).
    pub fn has_stable_configuration_cache(&self) -> bool {
        *self >= STABLE_CONFIGURATION_CACHE
    }
}

impl Ord for GradleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.qualifier, &other.qualifier) {
                (None, None) => Ordering::Equal,
                // A pre-release sorts before its release.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for GradleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GradleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{}", qualifier)?;
        }
        Ok(())
    }
}

/// How the build will be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Through the Gradle Tooling API (Gradle 8.0 and newer).
    ToolingApi,
    /// Through the `gradle` executable.
    Gradle,
    /// The version could not be determined.
    Undefined,
}

impl LaunchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToolingApi => "gradle-tooling-api",
            Self::Gradle => "gradle",
            Self::Undefined => "undefined",
        }
    }
}

/// Pick the launch mode: `gradle` unless configured otherwise; `auto` lets
/// the version decide.
pub fn select_launch_mode(configured: ConfiguredLaunchMode, version: Option<&str>) -> LaunchMode {
    match configured {
        ConfiguredLaunchMode::Gradle => LaunchMode::Gradle,
        ConfiguredLaunchMode::ToolingApi => LaunchMode::ToolingApi,
        ConfiguredLaunchMode::Auto => match version.and_then(GradleVersion::parse) {
            Some(v) if v >= TOOLING_API_SINCE => LaunchMode::ToolingApi,
            Some(_) => LaunchMode::Gradle,
            None => LaunchMode::Undefined,
        },
    }
}
