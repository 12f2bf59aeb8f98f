//! Pipeline — ties all build preparation stages together.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::args::env_builder::EnvSet;
use crate::config::RunnerSettings;
use crate::error::RunnerError;
use crate::jvm::merge_jvm_args;
use crate::launch::HandOff;
use crate::properties::{locate_build_properties, PropertySplitter};
use crate::resolve::{
    agent_local_user_home, detect_configuration_cache, detect_user_home,
    remove_user_home_argument, remove_user_home_system_property, select_launch_mode,
    GradleVersion, HomeSource, LaunchMode, ResolutionSources,
};

/// Inputs for one build.
#[derive(Debug, Clone, Default)]
pub struct LaunchRequest {
    /// Gradle tasks, in order.
    pub tasks: Vec<String>,
    /// Additional Gradle command-line parameters.
    pub params: Vec<String>,
    /// Root of the built project.
    pub project_dir: PathBuf,
    /// Agent environment.
    pub env: HashMap<String, String>,
    /// System properties of the agent process.
    pub system_properties: HashMap<String, String>,
    /// JVM arguments defined by the project (`org.gradle.jvmargs`).
    pub tool_jvm_args: Vec<String>,
    /// JVM arguments defined in the CI build configuration.
    pub ci_jvm_args: Vec<String>,
    /// Gradle version, when known.
    pub gradle_version: Option<String>,
    /// Directory receiving the hand-off files.
    pub temp_dir: PathBuf,
    /// Agent cache directory. When set and the override is enabled, the
    /// Gradle user home is relocated under it.
    pub agent_cache_dir: Option<PathBuf>,
    pub settings: RunnerSettings,
}

/// Ready-to-use parameters for launching Gradle.
#[derive(Debug, Clone)]
pub struct LaunchParams {
    /// Resolved Gradle user home.
    pub user_home: Option<PathBuf>,
    /// Whether `user_home` is the agent-local home.
    pub user_home_relocated: bool,
    pub configuration_cache_enabled: bool,
    pub configuration_cache_problems_ignored: bool,
    pub launch_mode: LaunchMode,
    /// Static properties file, when a build properties file is configured.
    pub static_properties: Option<PathBuf>,
    /// Merged JVM arguments.
    pub jvm_args: Vec<String>,
    /// Environment for the build.
    pub env: BTreeMap<String, String>,
    /// Warnings produced during preparation.
    pub warnings: Vec<String>,
}

/// Build launch parameters and write the hand-off files.
///
/// This is the main entry point for build preparation. Only the agent-local
/// user home, the property split and the hand-off files can fail.
pub fn build_launch_params(request: &LaunchRequest) -> Result<LaunchParams, RunnerError> {
    let settings = &request.settings;
    let version = request.gradle_version.as_deref().and_then(GradleVersion::parse);

    // Stage 1: User home
    let detected = detect_user_home(&request.tasks, &request.params, &request.env);
    let relocated = match &request.agent_cache_dir {
        Some(cache_dir) if settings.user_home_override => Some(agent_local_user_home(cache_dir)?),
        _ => None,
    };
    let user_home = relocated
        .clone()
        .or_else(|| detected.as_ref().map(|found| found.path.clone()));

    // Stage 2: Launch mode
    let launch_mode = select_launch_mode(settings.launch_mode, request.gradle_version.as_deref());
    info!("Launch mode: {}", launch_mode.as_str());

    // Gradle gets the home through GRADLE_USER_HOME, so the overrides that
    // beat the environment must go.
    let strip = if relocated.is_some() {
        Strip::All
    } else {
        match (launch_mode, detected.as_ref().map(|found| found.source)) {
            (LaunchMode::ToolingApi, Some(HomeSource::SystemProperty)) => Strip::Argument,
            (LaunchMode::ToolingApi, _) => Strip::All,
            (LaunchMode::Gradle | LaunchMode::Undefined, _) => Strip::Nothing,
        }
    };
    let tasks = strip.apply(&request.tasks);
    let params = strip.apply(&request.params);

    // Stage 3: Configuration cache, read from the home Gradle will use
    let sources = ResolutionSources::new(tasks.clone(), params.clone(), &request.project_dir)
        .with_user_home(user_home.clone());
    let cache = detect_configuration_cache(&sources, version.as_ref());
    let mut warnings = cache.warnings;

    if settings.read_all_params && cache.enabled {
        let message =
            "All build properties are read eagerly, the configuration cache will not be reused"
                .to_string();
        warn!("{}", message);
        warnings.push(message);
    }

    // Stage 4: Static properties
    let splitter = PropertySplitter::new(settings.static_suffix.clone());
    let static_properties =
        splitter.split_from_env(&request.system_properties, &request.env, &request.temp_dir)?;

    // Stage 5: JVM arguments
    let jvm_args = merge_jvm_args(&request.tool_jvm_args, &request.ci_jvm_args);

    // Stage 6: Environment
    let build_properties = locate_build_properties(&request.system_properties, &request.env);
    let env = EnvSet::new()
        .with_base(&request.env)
        .with_user_home(user_home.as_deref())
        .with_build_properties(build_properties.as_deref())
        .build();

    HandOff {
        tasks,
        params,
        jvm_args: jvm_args.clone(),
        env: env.clone(),
    }
    .write_to(&request.temp_dir)?;

    Ok(LaunchParams {
        user_home_relocated: relocated.is_some(),
        user_home,
        configuration_cache_enabled: cache.enabled,
        configuration_cache_problems_ignored: cache.problems_ignored,
        launch_mode,
        static_properties,
        jvm_args,
        env,
        warnings,
    })
}

/// User home arguments removed from the hand-off tasks and parameters.
#[derive(Debug, Clone, Copy)]
enum Strip {
    Nothing,
    /// `--gradle-user-home` / `-g` only; the system property is the resolved home.
    Argument,
    /// The option and `-Dgradle.user.home`.
    All,
}

impl Strip {
    fn apply(self, items: &[String]) -> Vec<String> {
        match self {
            Self::Nothing => items.to_vec(),
            Self::Argument => remove_user_home_argument(items),
            Self::All => remove_user_home_system_property(&remove_user_home_argument(items)),
        }
    }
}
