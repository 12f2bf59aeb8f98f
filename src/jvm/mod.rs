//! JVM arguments for the launched build.

mod merger;

pub use merger::merge_jvm_args;
