//! Configuration-cache detection.

use tracing::info;

use crate::args::{configuration_cache, configuration_cache_problems};
use crate::resolve::option::{resolve, ResolutionSources};
use crate::resolve::version::GradleVersion;

/// What the build will do with the configuration cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSettings {
    /// The configuration cache is enabled.
    pub enabled: bool,
    /// Configuration-cache problems are reported as warnings (`warn` mode).
    pub problems_ignored: bool,
    /// Unreadable property files encountered along the way.
    pub warnings: Vec<String>,
}

/// Whether the configuration cache is enabled. Defaults to `false`.
pub fn is_configuration_cache_enabled(
    sources: &ResolutionSources,
    version: Option<&GradleVersion>,
    warnings: &mut Vec<String>,
) -> bool {
    let resolution = resolve(&configuration_cache(version), sources);
    warnings.extend(resolution.warnings.iter().cloned());
    resolution.as_bool().unwrap_or(false)
}

/// Whether configuration-cache problems are only warnings. Defaults to `false`.
pub fn are_configuration_cache_problems_ignored(
    sources: &ResolutionSources,
    version: Option<&GradleVersion>,
    warnings: &mut Vec<String>,
) -> bool {
    let resolution = resolve(&configuration_cache_problems(version), sources);
    warnings.extend(resolution.warnings.iter().cloned());
    resolution
        .value
        .map(|value| value.eq_ignore_ascii_case("warn"))
        .unwrap_or(false)
}

/// Run both checks.
pub fn detect_configuration_cache(
    sources: &ResolutionSources,
    version: Option<&GradleVersion>,
) -> CacheSettings {
    let mut warnings = Vec::new();
    let enabled = is_configuration_cache_enabled(sources, version, &mut warnings);
    let problems_ignored = are_configuration_cache_problems_ignored(sources, version, &mut warnings);

    info!(
        "Configuration cache enabled: {}, problems ignored: {}",
        enabled, problems_ignored
    );

    CacheSettings {
        enabled,
        problems_ignored,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_disabled() {
        let dir = tempfile::TempDir::new().unwrap();
        let sources = ResolutionSources::new(vec![], vec![], dir.path());
        let settings = detect_configuration_cache(&sources, None);
        assert!(!settings.enabled);
        assert!(!settings.problems_ignored);
        assert!(settings.warnings.is_empty());
    }

    #[test]
    fn warn_mode_is_case_insensitive() {
        let dir = tempfile::TempDir::new().unwrap();
        let sources = ResolutionSources::new(
            vec![],
            vec!["--configuration-cache-problems=WARN".into()],
            dir.path(),
        );
        let mut warnings = Vec::new();
        assert!(are_configuration_cache_problems_ignored(
            &sources,
            None,
            &mut warnings
        ));
    }

    #[test]
    fn warn_mode_is_not_trimmed() {
        let dir = tempfile::TempDir::new().unwrap();
        let sources = ResolutionSources::new(
            vec![],
            vec!["--configuration-cache-problems=warn ".into()],
            dir.path(),
        );
        let mut warnings = Vec::new();
        assert!(!are_configuration_cache_problems_ignored(
            &sources,
            None,
            &mut warnings
        ));
    }
}
