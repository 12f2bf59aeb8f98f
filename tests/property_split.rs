//! Integration tests for the property splitter and the lazy container.

mod common;

use std::fs;
use std::sync::Arc;
use std::thread;

use common::{map, props, Workspace};
use gradle_runner::properties::{
    is_dynamic, read_properties, static_properties_path, write_properties, LazyPropertyContainer,
    PropertySplitter, BUILD_PROPERTIES_ENV, BUILD_PROPERTIES_SYSTEM_PROPERTY,
    CONFIGURATION_PROPERTIES_KEY, STATIC_SUFFIX, TEST_NAME_FORMAT_KEY, USE_TEST_RETRY_PLUGIN_KEY,
};

const BUILD_PROPERTIES: &[(&str, &str)] = &[
    ("build.number", "1234"),
    ("build.vcs.number", "abcdef"),
    ("teamcity.build.id", "99"),
    ("teamcity.version", "2024.1"),
    ("teamcity.build.tempDir", "/agent/temp/buildTmp"),
    ("teamcity.buildType.id", "Project_Build"),
    ("teamcity.projectName", "Project"),
    ("agent.name", "agent-1"),
    ("dep.Other_Build.build.number", "7"),
    ("dep.Other_Build.teamcity.buildType.id", "Other_Build"),
    ("path with spaces", "C:\\agent\\work dir"),
];

// =============================================================================
// SPLITTER
// =============================================================================

#[test]
fn static_file_contains_only_static_keys() {
    let ws = Workspace::new();
    let source = ws.build_properties(BUILD_PROPERTIES);

    let destination = PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap();
    assert_eq!(destination, static_properties_path(&source, STATIC_SUFFIX));

    let written = read_properties(&destination).unwrap();
    for (key, _) in BUILD_PROPERTIES {
        if is_dynamic(key) {
            assert!(!written.contains_key(*key), "{key} leaked into the static file");
        }
    }
    assert_eq!(written["teamcity.build.tempDir"], "/agent/temp/buildTmp");
    assert_eq!(written["dep.Other_Build.teamcity.buildType.id"], "Other_Build");
    assert_eq!(written["path with spaces"], "C:\\agent\\work dir");
    assert!(!written.contains_key("dep.Other_Build.build.number"));
}

#[test]
fn source_file_is_untouched() {
    let ws = Workspace::new();
    let source = ws.build_properties(BUILD_PROPERTIES);
    let before = fs::read(&source).unwrap();

    PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap();
    assert_eq!(fs::read(&source).unwrap(), before);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let ws = Workspace::new();
    let source = ws.build_properties(BUILD_PROPERTIES);
    let splitter = PropertySplitter::default();

    let first = fs::read(splitter.split_file(&source, &ws.temp_dir()).unwrap()).unwrap();

    // A new build: only dynamic values change.
    let mut next = props(BUILD_PROPERTIES);
    next.insert("build.number".into(), "1235".into());
    next.insert("teamcity.build.id".into(), "100".into());
    write_properties(&source, &next).unwrap();

    let second = fs::read(splitter.split_file(&source, &ws.temp_dir()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn output_is_sorted_without_header() {
    let ws = Workspace::new();
    let source = ws.build_properties(&[("b.key", "2"), ("a.key", "1")]);
    let destination = PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap();

    let text = fs::read_to_string(destination).unwrap();
    assert!(text.starts_with("a.key=1\nb.key=2\n"));
    assert!(!text.contains('#'));
}

#[test]
fn configuration_values_are_copied() {
    let ws = Workspace::new();
    let config = ws.root.path().join("config.properties");
    write_properties(
        &config,
        &props(&[
            (TEST_NAME_FORMAT_KEY, "{name}"),
            (USE_TEST_RETRY_PLUGIN_KEY, "false"),
            ("some.other.param", "ignored"),
        ]),
    )
    .unwrap();
    let source = ws.build_properties(&[(
        CONFIGURATION_PROPERTIES_KEY,
        config.to_str().unwrap(),
    )]);

    let written = read_properties(
        &PropertySplitter::default()
            .split_file(&source, &ws.temp_dir())
            .unwrap(),
    )
    .unwrap();

    assert_eq!(written[TEST_NAME_FORMAT_KEY], "{name}");
    assert_eq!(written[USE_TEST_RETRY_PLUGIN_KEY], "false");
    assert!(!written.contains_key("some.other.param"));
    assert_eq!(written["gradle.test.jvmargs"], "");
}

#[test]
fn temp_dir_is_created() {
    let ws = Workspace::new();
    let source = ws.build_properties(&[("agent.name", "a")]);
    let temp = ws.temp_dir().join("nested");

    PropertySplitter::default().split_file(&source, &temp).unwrap();
    assert!(temp.is_dir());
}

#[test]
fn split_from_env_is_noop_without_file() {
    let ws = Workspace::new();
    let splitter = PropertySplitter::default();

    assert_eq!(
        splitter
            .split_from_env(&map(&[]), &map(&[]), &ws.temp_dir())
            .unwrap(),
        None
    );

    let missing = ws.root.path().join("missing.properties");
    let env = map(&[(BUILD_PROPERTIES_ENV, missing.to_str().unwrap())]);
    assert_eq!(
        splitter
            .split_from_env(&map(&[]), &env, &ws.temp_dir())
            .unwrap(),
        None
    );
}

#[test]
fn split_from_env_prefers_system_property() {
    let ws = Workspace::new();
    let source = ws.build_properties(&[("agent.name", "a")]);
    let system = map(&[(BUILD_PROPERTIES_SYSTEM_PROPERTY, source.to_str().unwrap())]);
    let env = map(&[(BUILD_PROPERTIES_ENV, "/nowhere/build.properties")]);

    let written = PropertySplitter::default()
        .split_from_env(&system, &env, &ws.temp_dir())
        .unwrap();
    assert_eq!(written, Some(static_properties_path(&source, STATIC_SUFFIX)));
}

#[test]
fn write_failure_names_destination() {
    let ws = Workspace::new();
    let source = ws.build_properties(&[("agent.name", "a")]);
    // A directory where the static file should go makes the write fail.
    fs::create_dir(static_properties_path(&source, STATIC_SUFFIX)).unwrap();

    let err = PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap_err();
    assert!(err.to_string().contains("build.properties.static"));
}

// =============================================================================
// LAZY CONTAINER
// =============================================================================

#[test]
fn static_keys_never_open_dynamic_file() {
    let ws = Workspace::new();
    let source = ws.build_properties(BUILD_PROPERTIES);
    PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap();

    let container = LazyPropertyContainer::open(&source, STATIC_SUFFIX, false).unwrap();
    // Without the dynamic file any dynamic read would fail.
    fs::remove_file(&source).unwrap();

    let static_set = read_properties(&static_properties_path(&source, STATIC_SUFFIX)).unwrap();
    for (key, value) in &static_set {
        assert_eq!(container.get(key).unwrap().as_ref(), Some(value));
    }
    assert!(!container.dynamic_read());
    assert_eq!(container.snapshot(), static_set);
}

#[test]
fn dynamic_key_triggers_single_read() {
    let ws = Workspace::new();
    let source = ws.build_properties(BUILD_PROPERTIES);
    PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap();

    let container = LazyPropertyContainer::open(&source, STATIC_SUFFIX, false).unwrap();
    assert_eq!(container.get("build.number").unwrap().as_deref(), Some("1234"));
    assert!(container.dynamic_read());
    let static_len = read_properties(&static_properties_path(&source, STATIC_SUFFIX))
        .unwrap()
        .len();
    assert!(container.len() > static_len);
}

#[test]
fn concurrent_misses_read_once_and_agree() {
    let ws = Workspace::new();
    let source = ws.build_properties(BUILD_PROPERTIES);
    PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap();

    let container = Arc::new(LazyPropertyContainer::open(&source, STATIC_SUFFIX, false).unwrap());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let container = Arc::clone(&container);
            thread::spawn(move || {
                let key = if i % 2 == 0 { "build.number" } else { "agent.name" };
                container.get(key).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap();
        let expected = if i % 2 == 0 { "1234" } else { "agent-1" };
        assert_eq!(value.as_deref(), Some(expected));
    }
    assert!(container.dynamic_read());
}

#[test]
fn caller_values_survive_dynamic_read() {
    let ws = Workspace::new();
    let source = ws.build_properties(BUILD_PROPERTIES);
    PropertySplitter::default()
        .split_file(&source, &ws.temp_dir())
        .unwrap();

    let container = LazyPropertyContainer::open(&source, STATIC_SUFFIX, false).unwrap();
    container.put("build.number", "overridden");
    assert_eq!(
        container.get("build.vcs.number").unwrap().as_deref(),
        Some("abcdef")
    );
    assert_eq!(
        container.get("build.number").unwrap().as_deref(),
        Some("overridden")
    );
}
