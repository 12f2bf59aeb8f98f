//! Build configuration resolution for the Gradle runner.
//!
//! Decides which option value wins across command line, user home and
//! project, keeps the configuration cache usable by splitting build
//! properties into static and dynamic halves, and merges JVM arguments.

pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod jvm;
pub mod launch;
pub mod properties;
pub mod resolve;
