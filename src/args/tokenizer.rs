//! Argument tokenizer — raw token → (key, value).

/// Delimiter between a key and its value in `key=value` tokens.
pub const ARGS_DELIMITER: char = '=';

/// Every flag starts with this prefix; anything else is a positional value.
pub const PREFIX: &str = "-";

/// Memory-size flags whose value is everything after the flag name.
const MEMORY_FLAGS: [&str; 4] = ["-Xms", "-Xmx", "-Xss", "-Xmn"];

/// Flag families that accept `-flag:value`.
const COLON_SEPARATED_PREFIXES: [&str; 13] = [
    "-X",
    "-verbose",
    "-agentlib",
    "-agentpath",
    "-javaagent",
    "-splash",
    "--class-path",
    "-classpath",
    "-cp",
    "-enableassertions",
    "-ea",
    "-disableassertions",
    "-da",
];

/// HotSpot diagnostic options (`-XX:+UseG1GC`, `-XX:MaxMetaspaceSize=1g`) carry
/// colons that are part of the key.
const DIAGNOSTIC_PREFIX: &str = "-XX:";

/// Flags that open or export packages. Every value is its own slot.
const PACKAGE_ACCESSIBILITY_FLAGS: [&str; 2] = ["--add-opens", "--add-exports"];

/// Split a `name=value` token at the first `=`.
///
/// Returns the whole token and an empty value when there is no `=`.
pub fn split_equals(token: &str) -> (&str, &str) {
    match token.split_once(ARGS_DELIMITER) {
        Some((key, value)) => (key, value),
        None => (token, ""),
    }
}

/// Strip one layer of surrounding double quotes.
pub fn unquote(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// A parsed JVM argument.
///
/// `value` keeps its leading delimiter (`=`, `:`) or is the raw size suffix
/// for memory flags, so `key + value` always reproduces the original token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JvmArg {
    pub key: String,
    pub value: String,
}

impl JvmArg {
    /// Parse a single token. Never fails: an unparseable token becomes a key
    /// with an empty value.
    pub fn parse(arg: &str) -> Self {
        if let Some(flag) = MEMORY_FLAGS.iter().find(|flag| arg.starts_with(*flag)) {
            return Self::new(flag, &arg[flag.len()..]);
        }

        if is_colon_separated(arg) {
            if let Some(colon) = arg.find(':') {
                return Self::new(&arg[..colon], &arg[colon..]);
            }
        }

        match arg.find(ARGS_DELIMITER) {
            Some(i) if i > 0 => Self::new(&arg[..i], &arg[i..]),
            _ => Self::new(arg, ""),
        }
    }

    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Check whether the key is a flag rather than a positional value.
    pub fn is_flag(&self) -> bool {
        self.key.starts_with(PREFIX)
    }
}

fn is_colon_separated(arg: &str) -> bool {
    let colon = arg.find(':');
    let delimiter = arg.find(ARGS_DELIMITER);

    COLON_SEPARATED_PREFIXES
        .iter()
        .any(|prefix| arg.starts_with(prefix))
        && !arg.starts_with(DIAGNOSTIC_PREFIX)
        && matches!(colon, Some(i) if i > 0)
        && !matches!(delimiter, Some(i) if i > 0)
}

/// A value such as `name=value` given after a repeating flag.
pub fn is_composite_value(value: &str) -> bool {
    matches!(value.find(ARGS_DELIMITER), Some(i) if i > 0)
}

/// `--add-opens` / `--add-exports`.
pub fn is_package_accessibility_flag(key: &str) -> bool {
    PACKAGE_ACCESSIBILITY_FLAGS.contains(&key)
}
