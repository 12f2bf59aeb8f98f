//! Gradle runner CLI entry point.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gradle_runner::args::{build_launch_params, LaunchRequest};
use gradle_runner::cli::{init_tracing, Cli, Commands, DetectArgs, PrepareArgs};
use gradle_runner::config::RunnerSettings;
use gradle_runner::jvm::merge_jvm_args;
use gradle_runner::properties::{classify, PropertyClass, PropertySplitter};
use gradle_runner::resolve::{
    detect_configuration_cache, detect_user_home, select_launch_mode, GradleVersion,
    ResolutionSources,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => RunnerSettings::load_from(path),
        None => RunnerSettings::load(),
    }
    .context("Failed to load runner settings")?;

    match cli.command {
        Commands::Detect(args) => detect(args),
        Commands::Classify(args) => {
            for key in &args.keys {
                let class = match classify(key) {
                    PropertyClass::Static => "static",
                    PropertyClass::Dynamic => "dynamic",
                };
                println!("{}\t{}", key, class);
            }
            Ok(())
        }
        Commands::Split(args) => {
            let destination = PropertySplitter::new(settings.static_suffix)
                .split_file(&args.properties, &args.temp_dir)
                .with_context(|| format!("Failed to split {}", args.properties.display()))?;
            println!("{}", destination.display());
            Ok(())
        }
        Commands::MergeJvmArgs(args) => {
            for arg in merge_jvm_args(&args.tool, &args.ci) {
                println!("{}", arg);
            }
            Ok(())
        }
        Commands::LaunchMode(args) => {
            let mode = select_launch_mode(settings.launch_mode, args.gradle_version.as_deref());
            println!("{}", mode.as_str());
            Ok(())
        }
        Commands::Prepare(args) => prepare(args, settings),
    }
}

fn detect(args: DetectArgs) -> Result<()> {
    let project_dir = project_dir(args.project_dir)?;
    let env: HashMap<String, String> = env::vars().collect();
    let version = args.gradle_version.as_deref().and_then(GradleVersion::parse);

    let home = detect_user_home(&args.tasks, &args.params, &env);
    let sources = ResolutionSources::new(args.tasks, args.params, project_dir)
        .with_user_home(home.as_ref().map(|found| found.path.clone()));
    let cache = detect_configuration_cache(&sources, version.as_ref());

    match home {
        Some(found) => println!("user-home\t{}", found.path.display()),
        None => println!("user-home\t"),
    }
    println!("configuration-cache\t{}", cache.enabled);
    println!("configuration-cache-problems-ignored\t{}", cache.problems_ignored);
    Ok(())
}

fn prepare(args: PrepareArgs, settings: RunnerSettings) -> Result<()> {
    let ci_params: HashMap<String, String> = args.ci_params.into_iter().collect();
    let request = LaunchRequest {
        tasks: args.tasks,
        params: args.params,
        project_dir: project_dir(args.project_dir)?,
        env: env::vars().collect(),
        system_properties: HashMap::new(),
        tool_jvm_args: args.tool_jvm_arg,
        ci_jvm_args: args.ci_jvm_arg,
        gradle_version: args.gradle_version,
        temp_dir: args.temp_dir,
        agent_cache_dir: args.agent_cache_dir,
        settings: settings.apply_overrides(&ci_params),
    };

    // Warnings are already logged where they arise.
    let params = build_launch_params(&request).context("Build preparation failed")?;

    if let Some(home) = &params.user_home {
        println!("user-home\t{}", home.display());
    }
    println!("launch-mode\t{}", params.launch_mode.as_str());
    println!("configuration-cache\t{}", params.configuration_cache_enabled);
    if let Some(path) = &params.static_properties {
        println!("static-properties\t{}", path.display());
    }
    println!("jvm-args\t{}", params.jvm_args.join(" "));
    Ok(())
}

fn project_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => env::current_dir().context("Failed to get current directory"),
    }
}
