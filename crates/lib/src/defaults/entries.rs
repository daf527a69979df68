//! Parsing of `[section:]key=value` command-line entries.

use std::collections::BTreeMap;

use tracing::warn;

/// Section name used when an entry carries no explicit section.
pub const GLOBAL_SECTION: &str = "global";

/// Parsed default-value edits plus the entries that did not parse.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedEntries {
  pub entries: BTreeMap<String, BTreeMap<String, String>>,
  pub invalid: Vec<String>,
}

/// Parse raw `[section:]key=value` entries.
///
/// Splitting uses the first `:` and the first `=` only; values and section
/// names may contain either character after the first match. An entry with
/// no `=` is recorded in `invalid` and dropped, never fatal. Later entries
/// for the same `(section, key)` overwrite earlier ones.
pub fn parse_entries(raw: &[String]) -> ParsedEntries {
  let mut parsed = ParsedEntries::default();

  for entry in raw {
    let (section, key_value) = match entry.split_once(':') {
      Some((section, rest)) => (section, rest),
      None => (GLOBAL_SECTION, entry.as_str()),
    };

    match key_value.split_once('=') {
      Some((key, value)) => {
        parsed
          .entries
          .entry(section.to_string())
          .or_default()
          .insert(key.to_string(), value.to_string());
      }
      None => {
        warn!(entry = %entry, "invalid modify-defaults entry, skipping");
        parsed.invalid.push(entry.clone());
      }
    }
  }

  parsed
}
