//! Comparison documents for default-value edits.
//!
//! A comparison records, per section and key, the value currently in the
//! device's `.defaultvalues` file next to the value a patch wants to set.
//! It is generated before a patch is applied and later drives restoring the
//! file.
//!
//! Section naming differs across the three representations involved:
//! manifest entries use `global` for unsectioned keys, the INI file uses the
//! unscoped (empty) section, and comparison documents use `unscoped`. All
//! other section names pass through unchanged.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Comparison section name for keys outside any INI section.
pub const UNSCOPED_SECTION: &str = "unscoped";

/// Current-versus-requested state of a single key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueComparison {
  /// Value in the defaults file at comparison time; empty if absent.
  pub current_value: String,
  /// Value the patch wants to set.
  pub new_value: String,
  /// Whether the key was present in the defaults file.
  pub exists: bool,
}

/// A full comparison document, section -> key -> comparison.
pub type Comparison = BTreeMap<String, BTreeMap<String, ValueComparison>>;

/// Error while reading or writing a comparison document.
#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
  #[error("failed to read comparison file {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse comparison file {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error("failed to serialize comparison: {0}")]
  Serialize(serde_json::Error),

  #[error("failed to write comparison file {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}

/// Map a comparison section name to its INI section name.
pub(crate) fn ini_section_name(comparison_section: &str) -> &str {
  if comparison_section == UNSCOPED_SECTION {
    ""
  } else {
    comparison_section
  }
}

/// Map an INI section name to its comparison section name.
pub(crate) fn comparison_section_name(ini_section: &str) -> &str {
  if ini_section.is_empty() {
    UNSCOPED_SECTION
  } else {
    ini_section
  }
}

/// Generate a comparison from manifest entries and the parsed defaults file.
pub fn generate(
  entries: &BTreeMap<String, BTreeMap<String, String>>,
  defaults: &BTreeMap<String, BTreeMap<String, String>>,
) -> Comparison {
  let mut comparison = Comparison::new();

  for (section, keys) in entries {
    let (ini_section, output_section) = if section == crate::defaults::entries::GLOBAL_SECTION {
      ("", UNSCOPED_SECTION)
    } else {
      (section.as_str(), section.as_str())
    };

    let section_entries = comparison.entry(output_section.to_string()).or_default();
    for (key, new_value) in keys {
      let current = defaults.get(ini_section).and_then(|s| s.get(key));
      section_entries.insert(
        key.clone(),
        ValueComparison {
          current_value: current.cloned().unwrap_or_default(),
          new_value: new_value.clone(),
          exists: current.is_some(),
        },
      );
    }
  }

  comparison
}

/// Load a comparison document.
pub fn load(path: &Path) -> Result<Comparison, ComparisonError> {
  let content = fs::read_to_string(path).map_err(|e| ComparisonError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  serde_json::from_str(&content).map_err(|e| ComparisonError::Parse {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Save a comparison document as pretty-printed JSON.
pub fn save(path: &Path, comparison: &Comparison) -> Result<(), ComparisonError> {
  let content = serde_json::to_string_pretty(comparison).map_err(ComparisonError::Serialize)?;

  fs::write(path, content).map_err(|e| ComparisonError::Write {
    path: path.to_path_buf(),
    source: e,
  })
}
