//! Build properties: file format, static/dynamic classification, the
//! static-file splitter and the lazy container used inside the build.

mod classifier;
mod container;
mod format;
mod splitter;

pub use classifier::{
    classify, is_dynamic, strip_dependency_prefix, ClassRule, PropertyClass, DEPENDENCY_PREFIX,
    RULES,
};
pub use container::LazyPropertyContainer;
pub use format::{
    parse_properties, read_properties, to_properties_string, write_properties, Properties,
};
pub use splitter::{
    locate_build_properties, static_properties_path, PropertySplitter, BUILD_PROPERTIES_ENV,
    BUILD_PROPERTIES_SYSTEM_PROPERTY, CHANGED_FILES_KEY, CONFIGURATION_PROPERTIES_KEY,
    IGNORED_SUITE_FORMAT_KEY, STACKTRACE_LOG_DIR_KEY, STATIC_SUFFIX, TEST_JVM_ARGS_KEY,
    TEST_NAME_FORMAT_KEY, USE_TEST_RETRY_PLUGIN_KEY,
};
