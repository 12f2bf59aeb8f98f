//! Option registry — the Gradle options this runner needs to resolve.

use crate::resolve::version::GradleVersion;

/// How an option is spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Present/absent toggle (e.g., --configuration-cache).
    Boolean,
    /// Carries a payload, either `--name=value` or `--name value`.
    KeyValue,
}

/// A single resolvable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Does it carry a value?
    pub kind: OptionKind,
    /// Command-line spellings that enable the option (or carry its value).
    pub names: Vec<&'static str>,
    /// Command-line spellings that disable a boolean option.
    pub disabling_names: Vec<&'static str>,
    /// Keys checked in `gradle.properties`, in priority order.
    pub property_names: Vec<&'static str>,
}

impl OptionSpec {
    /// A boolean toggle with optional disabling spellings.
    pub fn boolean(
        names: Vec<&'static str>,
        disabling_names: Vec<&'static str>,
        property_names: Vec<&'static str>,
    ) -> Self {
        Self {
            kind: OptionKind::Boolean,
            names,
            disabling_names,
            property_names,
        }
    }

    /// An option carrying a string payload.
    pub fn key_value(names: Vec<&'static str>, property_names: Vec<&'static str>) -> Self {
        Self {
            kind: OptionKind::KeyValue,
            names,
            disabling_names: Vec::new(),
            property_names,
        }
    }
}

pub const CONFIGURATION_CACHE_FLAG: &str = "--configuration-cache";
pub const NO_CONFIGURATION_CACHE_FLAG: &str = "--no-configuration-cache";
pub const CONFIGURATION_CACHE_PROBLEMS_FLAG: &str = "--configuration-cache-problems";

pub const CONFIGURATION_CACHE_PROPERTY: &str = "org.gradle.configuration-cache";
pub const UNSAFE_CONFIGURATION_CACHE_PROPERTY: &str = "org.gradle.unsafe.configuration-cache";
pub const CONFIGURATION_CACHE_PROBLEMS_PROPERTY: &str = "org.gradle.configuration-cache.problems";
pub const UNSAFE_CONFIGURATION_CACHE_PROBLEMS_PROPERTY: &str =
    "org.gradle.unsafe.configuration-cache-problems";

/// Property keys for an option that was renamed when the configuration cache
/// became stable. Unknown versions check both spellings.
fn cache_property_names(
    version: Option<&GradleVersion>,
    stable: &'static str,
    unsafe_name: &'static str,
) -> Vec<&'static str> {
    match version {
        Some(v) if !v.has_stable_configuration_cache() => vec![unsafe_name],
        _ => vec![stable, unsafe_name],
    }
}

/// `--configuration-cache` / `--no-configuration-cache`.
pub fn configuration_cache(version: Option<&GradleVersion>) -> OptionSpec {
    OptionSpec::boolean(
        vec![CONFIGURATION_CACHE_FLAG],
        vec![NO_CONFIGURATION_CACHE_FLAG],
        cache_property_names(
            version,
            CONFIGURATION_CACHE_PROPERTY,
            UNSAFE_CONFIGURATION_CACHE_PROPERTY,
        ),
    )
}

/// `--configuration-cache-problems=(warn|fail)`.
pub fn configuration_cache_problems(version: Option<&GradleVersion>) -> OptionSpec {
    OptionSpec::key_value(
        vec![CONFIGURATION_CACHE_PROBLEMS_FLAG],
        cache_property_names(
            version,
            CONFIGURATION_CACHE_PROBLEMS_PROPERTY,
            UNSAFE_CONFIGURATION_CACHE_PROBLEMS_PROPERTY,
        ),
    )
}
