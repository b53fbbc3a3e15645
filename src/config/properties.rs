//! Minimal `key=value` properties parsing.

use std::collections::HashMap;

/// Parse properties file contents into a key/value map.
///
/// Each line is split at its first `=`, so values may themselves contain `=`.
/// Blank lines, lines without `=` and comment lines (`#` or `!`) are skipped.
/// Later duplicates win.
pub fn parse(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
