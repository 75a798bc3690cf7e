//! Flat `KEY=VALUE` environment file parsing.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Parses a flat environment file into key/value pairs.
///
/// One assignment per line. Empty lines and lines starting with `#` are
/// skipped, as are lines without a `=` (a malformed assignment carries no
/// usable value). Only the first `=` splits key from value, so values may
/// themselves contain `=`.
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Reads and parses an environment file from disk.
pub fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read environment file {}", path.display()))?;
    Ok(parse_env_file(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_skips_comments_and_blank_lines() {
        let vars = parse_env_file("A=1\n#comment\n\nB=2\n");
        assert_eq!(vars.len(), 2, "only real assignments should survive");
        assert_eq!(vars.get("A").map(String::as_str), Some("1"));
        assert_eq!(vars.get("B").map(String::as_str), Some("2"));
    }

    #[test]
    fn parser_ignores_lines_without_assignment() {
        let vars = parse_env_file("VALID=yes\nnot an assignment\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("VALID").map(String::as_str), Some("yes"));
    }

    #[test]
    fn parser_splits_on_first_equals_only() {
        let vars = parse_env_file("DATABASE_URL=mysql://u:p@host/db?opt=1\n");
        assert_eq!(
            vars.get("DATABASE_URL").map(String::as_str),
            Some("mysql://u:p@host/db?opt=1")
        );
    }

    #[test]
    fn parser_keeps_empty_values() {
        let vars = parse_env_file("EMPTY=\n");
        assert_eq!(vars.get("EMPTY").map(String::as_str), Some(""));
    }
}
