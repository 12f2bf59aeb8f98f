//! Argument handling for the Gradle build.
//!
//! ```text
//! Tokens → Tokenize → Resolve options → Merge JVM args → Assemble env → LaunchParams
//! ```
//!
//! Each stage is a pure function that can be unit-tested independently,
//! except the final pipeline which writes the static properties and
//! hand-off files.

mod env_builder;
mod pipeline;
mod registry;
mod tokenizer;

pub use env_builder::EnvSet;
pub use pipeline::{build_launch_params, LaunchParams, LaunchRequest};
pub use registry::{
    configuration_cache, configuration_cache_problems, OptionKind, OptionSpec,
    CONFIGURATION_CACHE_FLAG, CONFIGURATION_CACHE_PROBLEMS_FLAG, CONFIGURATION_CACHE_PROBLEMS_PROPERTY,
    CONFIGURATION_CACHE_PROPERTY, NO_CONFIGURATION_CACHE_FLAG,
    UNSAFE_CONFIGURATION_CACHE_PROBLEMS_PROPERTY, UNSAFE_CONFIGURATION_CACHE_PROPERTY,
};
pub use tokenizer::{
    is_composite_value, is_package_accessibility_flag, split_equals, unquote, JvmArg,
    ARGS_DELIMITER, PREFIX,
};
