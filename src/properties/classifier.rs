//! Property classifier — build property key → static or dynamic.
//!
//! A dynamic property changes from build to build (`build.number`,
//! `teamcity.build.id`). Reading one during configuration makes Gradle
//! discard its configuration cache, so only static properties go into the
//! cache-stable file.

/// Verdict for a single property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyClass {
    /// Identical across builds of the same configuration.
    Static,
    /// Changes on (nearly) every build.
    Dynamic,
}

/// A prefix rule. The first rule whose prefix matches decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRule {
    pub prefix: &'static str,
    pub class: PropertyClass,
}

const fn rule(prefix: &'static str, class: PropertyClass) -> ClassRule {
    ClassRule { prefix, class }
}

/// Dependency parameters look like `dep.<buildTypeId>.<key>`.
pub const DEPENDENCY_PREFIX: &str = "dep.";

/// Ordered rule table. Keys matching no rule are static.
pub const RULES: &[ClassRule] = &[
    rule("build.", PropertyClass::Dynamic),
    rule("teamcity.build.id", PropertyClass::Dynamic),
    // Build-invariant exceptions inside the teamcity namespace.
    rule("teamcity.build.", PropertyClass::Static),
    rule("teamcity.buildConfName", PropertyClass::Static),
    rule("teamcity.buildType.", PropertyClass::Static),
    rule("teamcity.configuration.", PropertyClass::Static),
    rule("teamcity.runner.", PropertyClass::Static),
    rule("teamcity.projectName", PropertyClass::Static),
    rule("teamcity.tests.", PropertyClass::Static),
    rule("teamcity.", PropertyClass::Dynamic),
];

/// Strip `dep.<buildTypeId>.` so the rest is classified like a regular key.
///
/// A key with no second `.` is returned unchanged.
pub fn strip_dependency_prefix(key: &str) -> &str {
    key.strip_prefix(DEPENDENCY_PREFIX)
        .and_then(|rest| rest.find('.').map(|i| &rest[i + 1..]))
        .unwrap_or(key)
}

/// Classify a property key. Depends on the key only.
pub fn classify(key: &str) -> PropertyClass {
    let key = strip_dependency_prefix(key);
    RULES
        .iter()
        .find(|rule| key.starts_with(rule.prefix))
        .map(|rule| rule.class)
        .unwrap_or(PropertyClass::Static)
}

pub fn is_dynamic(key: &str) -> bool {
    classify(key) == PropertyClass::Dynamic
}
