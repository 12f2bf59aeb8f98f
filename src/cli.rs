//! CLI argument definitions using clap derive.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Gradle runner build preparation
///
/// Resolves Gradle options, splits build properties into a cache-stable
/// static file and merges JVM arguments before the build is launched.
#[derive(Parser, Debug)]
#[command(name = "gradle-runner")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Settings file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved user home and configuration-cache settings
    Detect(DetectArgs),

    /// Print `static` or `dynamic` for each property key
    Classify(ClassifyArgs),

    /// Write the static half of a build properties file
    Split(SplitArgs),

    /// Merge project and CI JVM arguments
    MergeJvmArgs(MergeJvmArgsArgs),

    /// Print the launch mode for a Gradle version
    LaunchMode(LaunchModeArgs),

    /// Run the whole preparation and write the hand-off files
    Prepare(PrepareArgs),
}

/// Arguments for the detect command
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// Project directory (defaults to current directory)
    #[arg(short, long)]
    pub project_dir: Option<PathBuf>,

    /// Gradle version, selects the property names checked
    #[arg(long)]
    pub gradle_version: Option<String>,

    /// Gradle tasks
    pub tasks: Vec<String>,

    /// Gradle command-line parameters (after `--`)
    #[arg(last = true)]
    pub params: Vec<String>,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Property keys
    #[arg(required = true)]
    pub keys: Vec<String>,
}

/// Arguments for the split command
#[derive(Parser, Debug)]
pub struct SplitArgs {
    /// Build properties file
    #[arg(long)]
    pub properties: PathBuf,

    /// Temporary directory of the build (created if missing)
    #[arg(long)]
    pub temp_dir: PathBuf,
}

/// Arguments for the merge-jvm-args command
#[derive(Parser, Debug)]
pub struct MergeJvmArgsArgs {
    /// Project JVM argument (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    pub tool: Vec<String>,

    /// CI JVM argument (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    pub ci: Vec<String>,
}

/// Arguments for the launch-mode command
#[derive(Parser, Debug)]
pub struct LaunchModeArgs {
    /// Gradle version
    #[arg(long)]
    pub gradle_version: Option<String>,
}

/// Arguments for the prepare command
#[derive(Parser, Debug)]
pub struct PrepareArgs {
    /// Project directory (defaults to current directory)
    #[arg(short, long)]
    pub project_dir: Option<PathBuf>,

    /// Temporary directory receiving the hand-off files
    #[arg(long)]
    pub temp_dir: PathBuf,

    /// Agent cache directory; relocates the Gradle user home under it
    #[arg(long)]
    pub agent_cache_dir: Option<PathBuf>,

    /// Gradle version
    #[arg(long)]
    pub gradle_version: Option<String>,

    /// Project JVM argument (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    pub tool_jvm_arg: Vec<String>,

    /// CI JVM argument (repeatable)
    #[arg(long, allow_hyphen_values = true)]
    pub ci_jvm_arg: Vec<String>,

    /// CI configuration parameter (KEY=VALUE, repeatable)
    #[arg(long = "param", value_parser = parse_key_value)]
    pub ci_params: Vec<(String, String)>,

    /// Gradle tasks
    pub tasks: Vec<String>,

    /// Gradle command-line parameters (after `--`)
    #[arg(last = true)]
    pub params: Vec<String>,
}

/// Parse `KEY=VALUE`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Expected KEY=VALUE, got '{}'", s)),
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let default = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_parsing() {
        assert_eq!(
            parse_key_value("a.b=c=d").unwrap(),
            ("a.b".to_string(), "c=d".to_string())
        );
        assert!(parse_key_value("=x").is_err());
        assert!(parse_key_value("novalue").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
