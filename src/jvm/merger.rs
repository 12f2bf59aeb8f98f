//! JVM argument merger — project arguments + CI arguments → one list.
//!
//! CI values override project values for the same key. Memory flags,
//! colon-separated flags and repeating `-flag value` pairs are keyed as the
//! tokenizer parses them.

use tracing::debug;

use crate::args::{is_composite_value, is_package_accessibility_flag, unquote, JvmArg};

/// Values collected for one key, in first-seen order without duplicates.
#[derive(Debug, Default)]
struct Slot {
    key: String,
    values: Vec<String>,
}

impl Slot {
    fn add(&mut self, value: &str) {
        if !self.values.iter().any(|v| v == value) {
            self.values.push(value.to_string());
        }
    }
}

/// Merge `tool` (project) JVM arguments with `ci` arguments.
///
/// Empty tokens are dropped and one layer of quotes is removed. For keys
/// that occur more than once the last value wins; composite values
/// (`name=value` after a repeating flag) are overridden per sub-key.
pub fn merge_jvm_args<S: AsRef<str>>(tool: &[S], ci: &[S]) -> Vec<String> {
    debug!("Merging JVM arguments");
    debug!("Project JVM arguments: {}", join(tool));
    debug!("CI JVM arguments: {}", join(ci));

    let mut slots = group_by_key(tool.iter().chain(ci.iter()).map(|item| item.as_ref()));

    for slot in &mut slots {
        if slot.values.len() > 1 {
            slot.values = reduce(&slot.key, &slot.values);
        }
    }

    let mut result = Vec::new();
    for slot in &slots {
        for value in &slot.values {
            if emits_as_pair(&slot.key, value) {
                result.push(slot.key.clone());
                result.push(value.clone());
            } else {
                result.push(format!("{}{}", slot.key, value));
            }
        }
    }

    debug!("Merging result: {}", result.join(" "));
    result
}

/// Group values by key. A token that is not a flag is the value of the
/// flag right before it (`-Foo bar=1`), then the pairing resets.
fn group_by_key<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<Slot> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut last: Option<usize> = None;

    for raw in tokens.filter(|t| !t.is_empty()).map(unquote) {
        let arg = JvmArg::parse(raw);
        match last {
            Some(index) if !arg.is_flag() => {
                slots[index].add(raw);
                last = None;
            }
            _ => {
                let index = match slots.iter().position(|slot| slot.key == arg.key) {
                    Some(index) => index,
                    None => {
                        slots.push(Slot {
                            key: arg.key,
                            values: Vec::new(),
                        });
                        slots.len() - 1
                    }
                };
                slots[index].add(&arg.value);
                last = Some(index);
            }
        }
    }

    slots
}

/// Composite values keyed by sub-key (later wins, first position kept),
/// then the last scalar value.
fn reduce(key: &str, values: &[String]) -> Vec<String> {
    let mut composites: Vec<JvmArg> = Vec::new();
    let mut last_scalar: Option<&String> = None;

    for value in values.iter().filter(|v| !v.is_empty()) {
        if is_composite_value(value) || is_package_accessibility_flag(key) {
            let sub = JvmArg::parse(value);
            match composites.iter_mut().find(|c| c.key == sub.key) {
                Some(existing) => existing.value = sub.value,
                None => composites.push(sub),
            }
        } else {
            last_scalar = Some(value);
        }
    }

    composites
        .into_iter()
        .map(|c| format!("{}{}", c.key, c.value))
        .chain(last_scalar.cloned())
        .collect()
}

/// `--add-opens` values are separate tokens even without an `=`.
fn emits_as_pair(key: &str, value: &str) -> bool {
    is_composite_value(value) || (is_package_accessibility_flag(key) && !value.is_empty())
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}
