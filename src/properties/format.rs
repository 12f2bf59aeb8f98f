//! Java `.properties` reading and deterministic writing.
//!
//! Files are ISO 8859-1 on disk. Everything outside printable ASCII is
//! written as `\uXXXX`, so the writer's output is plain ASCII.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::PropertiesError;

/// A flat key/value set, sorted by key.
pub type Properties = BTreeMap<String, String>;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Read a properties file.
pub fn read_properties(path: &Path) -> Result<Properties, PropertiesError> {
    let bytes = fs::read(path).map_err(|e| PropertiesError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text: String = bytes.iter().map(|&b| b as char).collect();

    parse_properties(&text).map_err(|reason| PropertiesError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Write `properties` to `path`: sorted keys, no header, no timestamp.
pub fn write_properties(path: &Path, properties: &Properties) -> Result<(), PropertiesError> {
    fs::write(path, to_properties_string(properties)).map_err(|e| PropertiesError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse properties text. Later duplicates overwrite earlier ones.
pub fn parse_properties(text: &str) -> Result<Properties, String> {
    let mut properties = Properties::new();
    for line in logical_lines(text) {
        let (key, value) = split_key_value(&line);
        properties.insert(load_convert(key)?, load_convert(value)?);
    }
    Ok(properties)
}

/// Serialize deterministically. Identical input always yields identical bytes.
pub fn to_properties_string(properties: &Properties) -> String {
    let mut out = String::new();
    for (key, value) in properties {
        out.push_str(&save_convert(key, true));
        out.push('=');
        out.push_str(&save_convert(value, false));
        out.push('\n');
    }
    out
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Join continuation lines and drop blanks and comments.
fn logical_lines(text: &str) -> Vec<Vec<char>> {
    let mut lines = Vec::new();
    let mut current: Vec<char> = Vec::new();
    let mut continuing = false;

    for natural in text.split('\n') {
        let natural = natural.strip_suffix('\r').unwrap_or(natural);
        let trimmed: Vec<char> = natural.chars().skip_while(|c| is_whitespace(*c)).collect();

        if !continuing {
            if trimmed.is_empty() || trimmed[0] == '#' || trimmed[0] == '!' {
                continue;
            }
            current.clear();
        }

        let trailing = trimmed.iter().rev().take_while(|c| **c == '\\').count();
        if trailing % 2 == 1 {
            current.extend_from_slice(&trimmed[..trimmed.len() - 1]);
            continuing = true;
        } else {
            current.extend_from_slice(&trimmed);
            continuing = false;
            lines.push(std::mem::take(&mut current));
        }
    }

    if continuing {
        lines.push(current);
    }
    lines
}

/// Split at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &[char]) -> (&[char], &[char]) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut preceding_backslash = false;

    for (i, &c) in line.iter().enumerate() {
        if !preceding_backslash && (c == '=' || c == ':') {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if !preceding_backslash && is_whitespace(c) {
            key_end = i;
            value_start = i + 1;
            break;
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
    }

    while value_start < line.len() {
        let c = line[value_start];
        if !is_whitespace(c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    (&line[..key_end], &line[value_start..])
}

/// Resolve escapes. `\uXXXX` pairs combine into supplementary characters.
fn load_convert(chars: &[char]) -> Result<String, String> {
    let mut units: Vec<u16> = Vec::with_capacity(chars.len());
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let Some(escaped) = iter.next() else {
            break;
        };
        let unit = match escaped {
            'u' => {
                let hex: String = iter.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err("Malformed \\uxxxx encoding".to_string());
                }
                u16::from_str_radix(&hex, 16)
                    .map_err(|_| "Malformed \\uxxxx encoding".to_string())?
            }
            't' => '\t' as u16,
            'r' => '\r' as u16,
            'n' => '\n' as u16,
            'f' => 0x0C,
            other => {
                let mut buf = [0u16; 2];
                units.extend_from_slice(other.encode_utf16(&mut buf));
                continue;
            }
        };
        units.push(unit);
    }

    Ok(String::from_utf16_lossy(&units))
}

/// Escape for writing. Keys also escape every space; values only a leading one.
fn save_convert(text: &str, escape_space: bool) -> String {
    let mut out = String::with_capacity(text.len() * 2);

    for (i, unit) in text.encode_utf16().enumerate() {
        if unit > 61 && unit < 127 {
            if unit == u16::from(b'\\') {
                out.push_str("\\\\");
            } else {
                out.push(char::from(unit as u8));
            }
            continue;
        }
        match unit {
            0x20 => {
                if i == 0 || escape_space {
                    out.push('\\');
                }
                out.push(' ');
            }
            0x09 => out.push_str("\\t"),
            0x0A => out.push_str("\\n"),
            0x0D => out.push_str("\\r"),
            0x0C => out.push_str("\\f"),
            0x3D | 0x3A | 0x23 | 0x21 => {
                out.push('\\');
                out.push(char::from(unit as u8));
            }
            u if !(0x20..=0x7E).contains(&u) => {
                out.push_str("\\u");
                for shift in [12, 8, 4, 0] {
                    out.push(char::from(HEX_DIGITS[usize::from((u >> shift) & 0xF)]));
                }
            }
            u => out.push(char::from(u as u8)),
        }
    }

    out
}
