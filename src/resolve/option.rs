//! Option resolver — find the value of a Gradle option across its sources.
//!
//! Sources in descending priority:
//! 1. command-line tasks and parameters,
//! 2. `gradle.properties` in the Gradle user home (overridable from the command line),
//! 3. `gradle.properties` in the project directory.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::args::{split_equals, OptionKind, OptionSpec};
use crate::properties::read_properties;
use crate::resolve::home::detect_override;
use crate::resolve::layered::first_match;

pub const GRADLE_PROPERTIES_FILENAME: &str = "gradle.properties";

/// Everything an option may be read from.
#[derive(Debug, Clone, Default)]
pub struct ResolutionSources {
    /// Gradle tasks, scanned before `params`.
    pub tasks: Vec<String>,
    /// Additional Gradle command-line parameters.
    pub params: Vec<String>,
    /// Gradle user home known to the caller (e.g., from `GRADLE_USER_HOME`).
    pub user_home: Option<PathBuf>,
    /// Root of the built project.
    pub project_dir: PathBuf,
}

impl ResolutionSources {
    pub fn new(tasks: Vec<String>, params: Vec<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            tasks,
            params,
            user_home: None,
            project_dir: project_dir.into(),
        }
    }

    pub fn with_user_home(mut self, user_home: Option<PathBuf>) -> Self {
        self.user_home = user_home;
        self
    }

    /// Tasks then parameters, in order.
    pub fn tokens(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .chain(self.params.iter())
            .map(String::as_str)
            .collect()
    }

    /// User home whose `gradle.properties` is consulted. A command-line
    /// override beats the caller-supplied directory.
    pub fn effective_user_home(&self) -> Option<PathBuf> {
        detect_override(&self.tokens())
            .map(|found| found.path)
            .or_else(|| self.user_home.clone())
    }
}

/// The tier that defined an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFrom {
    CommandLine,
    UserHome(PathBuf),
    ProjectDirectory(PathBuf),
}

/// Result of resolving one option.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Raw textual value, `None` when no source defines the option.
    pub value: Option<String>,
    /// Tier the value came from.
    pub source: Option<ResolvedFrom>,
    /// Unreadable property files that were skipped.
    pub warnings: Vec<String>,
}

impl Resolution {
    /// Interpret the value as a boolean (`true`, case-insensitive).
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_deref().map(parse_bool)
    }
}

/// Boolean parsing as the JVM does it: only `true` (any case) is true.
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Resolve `spec` against `sources`. Never fails; unreadable files are
/// reported in `warnings` and treated as absent.
pub fn resolve(spec: &OptionSpec, sources: &ResolutionSources) -> Resolution {
    let mut warnings = Vec::new();

    let tiers = [
        Some(ResolvedFrom::CommandLine),
        sources.effective_user_home().map(ResolvedFrom::UserHome),
        Some(ResolvedFrom::ProjectDirectory(sources.project_dir.clone())),
    ];

    let hit = first_match(tiers.into_iter().flatten(), |tier| match tier {
        ResolvedFrom::CommandLine => check_command_line(spec, &sources.tokens()),
        ResolvedFrom::UserHome(dir) | ResolvedFrom::ProjectDirectory(dir) => {
            check_properties_file(dir, &spec.property_names, &mut warnings)
        }
    });

    match hit {
        Some(hit) => {
            debug!("Option {:?} resolved from {:?}", spec.names, hit.source);
            Resolution {
                value: Some(hit.value),
                source: Some(hit.source),
                warnings,
            }
        }
        None => Resolution {
            value: None,
            source: None,
            warnings,
        },
    }
}

fn check_command_line(spec: &OptionSpec, tokens: &[&str]) -> Option<String> {
    match spec.kind {
        // Enabling spellings take precedence over disabling ones wherever they appear.
        OptionKind::Boolean => {
            if spec.names.iter().any(|name| tokens.contains(name)) {
                Some(true.to_string())
            } else if spec.disabling_names.iter().any(|name| tokens.contains(name)) {
                Some(false.to_string())
            } else {
                None
            }
        }
        OptionKind::KeyValue => {
            for (i, item) in tokens.iter().enumerate() {
                for name in &spec.names {
                    let (key, value) = split_equals(item);
                    if key == *name && key.len() < item.len() {
                        return Some(value.to_string());
                    }
                    if item == name {
                        if let Some(next) = tokens.get(i + 1) {
                            return Some(next.to_string());
                        }
                    }
                }
            }
            None
        }
    }
}

fn check_properties_file(
    dir: &Path,
    property_names: &[&'static str],
    warnings: &mut Vec<String>,
) -> Option<String> {
    let path = dir.join(GRADLE_PROPERTIES_FILENAME);
    if !path.is_file() {
        return None;
    }

    let properties = match read_properties(&path) {
        Ok(properties) => properties,
        Err(e) => {
            warn!("{}", e);
            warnings.push(e.to_string());
            return None;
        }
    };

    property_names
        .iter()
        .find_map(|name| properties.get(*name).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::configuration_cache;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn enabling_name_beats_disabling_name() {
        let spec = configuration_cache(None);
        let tokens = ["--no-configuration-cache", "build", "--configuration-cache"];
        assert_eq!(check_command_line(&spec, &tokens), Some("true".into()));
    }

    #[test]
    fn disabling_name_alone() {
        let spec = configuration_cache(None);
        assert_eq!(
            check_command_line(&spec, &["--no-configuration-cache"]),
            Some("false".into())
        );
    }

    #[test]
    fn key_value_forms() {
        let spec = OptionSpec::key_value(vec!["--mode"], vec![]);
        assert_eq!(
            check_command_line(&spec, &["--mode=warn"]),
            Some("warn".into())
        );
        assert_eq!(
            check_command_line(&spec, &["--mode", "fail"]),
            Some("fail".into())
        );
        assert_eq!(check_command_line(&spec, &["--mode"]), None);
        assert_eq!(check_command_line(&spec, &["--modest=x"]), None);
    }

    #[test]
    fn first_key_value_occurrence_wins() {
        let spec = OptionSpec::key_value(vec!["--mode"], vec![]);
        assert_eq!(
            check_command_line(&spec, &["--mode=warn", "--mode=fail"]),
            Some("warn".into())
        );
    }

    #[test]
    fn boolean_parsing() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("true "));
        assert!(!parse_bool("yes"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn command_line_override_beats_supplied_home() {
        let sources = ResolutionSources::new(strings(&["-g=/cl"]), vec![], "/project")
            .with_user_home(Some(PathBuf::from("/env")));
        assert_eq!(sources.effective_user_home(), Some(PathBuf::from("/cl")));

        let sources = ResolutionSources::new(vec![], vec![], "/project")
            .with_user_home(Some(PathBuf::from("/env")));
        assert_eq!(sources.effective_user_home(), Some(PathBuf::from("/env")));
    }
}
