//! Option resolution for the Gradle build.
//!
//! ```text
//! Tokens + Home + Project → Layered lookup → Resolution
//! ```
//!
//! Every lookup here is total: a source that cannot be read counts as a
//! source that does not define the option.

pub mod cache;
pub mod home;
pub mod layered;
pub mod option;
pub mod version;

pub use cache::{
    are_configuration_cache_problems_ignored, detect_configuration_cache,
    is_configuration_cache_enabled, CacheSettings,
};
pub use home::{
    agent_local_user_home, detect_override, detect_user_home, remove_user_home_argument,
    remove_user_home_system_property, HomeDetection, HomeSource,
};
pub use layered::{first_match, Hit};
pub use option::{
    parse_bool, resolve, Resolution, ResolutionSources, ResolvedFrom, GRADLE_PROPERTIES_FILENAME,
};
pub use version::{select_launch_mode, GradleVersion, LaunchMode};
