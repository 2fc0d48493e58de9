//! Identifier list loading.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read one identifier per line from a text file.
pub fn read_identifier_file(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read identifier file {}", path.display()))?;
    Ok(parse_identifiers(&contents))
}

/// Split file contents into raw identifiers.
///
/// Blank lines are skipped. Other lines are kept as-is apart from the line
/// terminator, so malformed rows still reach the validator and get reported.
pub fn parse_identifiers(contents: &str) -> Vec<String> {
    contents
        .strip_prefix('\u{feff}')
        .unwrap_or(contents)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
