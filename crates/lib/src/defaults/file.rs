//! The device's INI-style `.defaultvalues` file.
//!
//! Format: `[name]` lines open a section, `key = value` lines assign within
//! the current section, `#` and `;` lines are comments. A blank or comment
//! line resets the current section to the unscoped (empty-name) section; the
//! device's own parser behaves this way, so a section's keys must be
//! contiguous.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::compare::{Comparison, comparison_section_name, ini_section_name};

/// Error while reading or writing the defaults file.
#[derive(Debug, thiserror::Error)]
pub enum DefaultsFileError {
  #[error("failed to read defaults file {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write defaults file {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}

/// Parse the defaults file into section -> key -> value.
///
/// Keys outside any `[section]` land in the empty-name section.
pub fn parse_defaults(path: &Path) -> Result<BTreeMap<String, BTreeMap<String, String>>, DefaultsFileError> {
  let content = fs::read_to_string(path).map_err(|e| DefaultsFileError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
  let mut current_section = String::new();

  for line in content.lines() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
      current_section.clear();
      continue;
    }

    if line.starts_with('[') && line.ends_with(']') {
      current_section = line[1..line.len() - 1].trim().to_string();
      sections.entry(current_section.clone()).or_default();
      continue;
    }

    if let Some((key, value)) = line.split_once('=') {
      sections
        .entry(current_section.clone())
        .or_default()
        .insert(key.trim().to_string(), value.trim().to_string());
    }
  }

  Ok(sections)
}

/// Rewrite the defaults file from a comparison document.
///
/// Walks the file line by line, preserving comments, blank lines, and
/// section headers:
/// - keys the patch introduced (`exists: false`, empty `current_value`) are
///   deleted;
/// - keys with `exists: true` are rewritten as `key = current_value`;
/// - everything else is kept as-is.
///
/// No new keys are added; restore only undoes what the patch changed.
pub fn apply_comparison(path: &Path, comparison: &Comparison) -> Result<(), DefaultsFileError> {
  let content = fs::read_to_string(path).map_err(|e| DefaultsFileError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  // Keys the patch introduced, grouped by INI section name.
  let mut to_remove: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
  for (section, keys) in comparison {
    for (key, entry) in keys {
      if !entry.exists && entry.current_value.is_empty() {
        to_remove
          .entry(ini_section_name(section))
          .or_default()
          .insert(key.as_str());
      }
    }
  }

  let mut lines: Vec<String> = Vec::new();
  let mut current_section = String::new();

  for line in content.lines() {
    let trimmed = line.trim();

    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
      lines.push(line.to_string());
      current_section.clear();
      continue;
    }

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
      current_section = trimmed[1..trimmed.len() - 1].trim().to_string();
      lines.push(line.to_string());
      continue;
    }

    if let Some((raw_key, _)) = trimmed.split_once('=') {
      let key = raw_key.trim();

      if to_remove
        .get(current_section.as_str())
        .is_some_and(|keys| keys.contains(key))
      {
        continue;
      }

      let section = comparison_section_name(&current_section);
      if let Some(entry) = comparison.get(section).and_then(|keys| keys.get(key))
        && entry.exists
      {
        lines.push(format!("{} = {}", key, entry.current_value));
        continue;
      }

      lines.push(line.to_string());
    }
  }

  let mut output = lines.join("\n");
  output.push('\n');

  fs::write(path, output).map_err(|e| DefaultsFileError::Write {
    path: path.to_path_buf(),
    source: e,
  })
}
