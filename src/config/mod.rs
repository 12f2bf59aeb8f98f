//! Runner settings: an optional TOML file plus CI configuration parameters.

mod loader;
mod types;

pub use loader::{
    bool_param, ConfigError, LAUNCH_MODE_PARAM, READ_ALL_PARAMS_PARAM, USER_HOME_OVERRIDE_PARAM,
};
pub use types::{ConfiguredLaunchMode, RunnerSettings};
