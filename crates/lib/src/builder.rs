//! Forward and restore operation construction.
//!
//! The builder turns a [`PatchRequest`] into the forward operation list and,
//! in lock-step, a best-effort restore list. Only `remove` and `add` have a
//! recorded inverse: a removal restores from a synthesized backup path, an
//! add is undone by removing the installed file. Commands, scripts, and
//! default-value edits lose too much information to invert, so the restore
//! manifest deliberately carries nothing for them.
//!
//! Invalid entries are dropped, not fatal: partial manifest generation is an
//! accepted outcome. Every drop is recorded as a [`SkippedEntry`] for the
//! caller to surface.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::checksum::file_checksum;
use crate::config::Config;
use crate::manifest::Operation;
use crate::paths::is_valid_target;

/// An embedded script to install via the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEntry {
  pub name: String,
  pub content: String,
}

/// Everything the user asked to put into the patch.
#[derive(Debug, Clone, Default)]
pub struct PatchRequest {
  /// Device paths to delete.
  pub remove_files: Vec<String>,
  /// Device paths to install.
  pub add_files: Vec<String>,
  /// Local directory supplying source bytes, matched by basename.
  pub add_dir: Option<PathBuf>,
  /// Shell commands to embed verbatim.
  pub commands: Vec<String>,
  /// Scripts to embed verbatim.
  pub scripts: Vec<ScriptEntry>,
  /// Default-value edits, section -> key -> value.
  pub modify_defaults: BTreeMap<String, BTreeMap<String, String>>,
}

/// Result of building a patch: both operation lists plus what was dropped.
#[derive(Debug, Default)]
pub struct PatchBuild {
  pub operations: Vec<Operation>,
  pub restore_operations: Vec<Operation>,
  pub skipped: Vec<SkippedEntry>,
}

/// Why an entry was excluded from both manifests.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
  /// Target path is outside every allowed firmware prefix.
  PathOutsideAllowList,
  /// Add target has no usable basename to match a source file against.
  NoBasename,
  /// Source file for an add target was not found in the add directory.
  MissingSource { source: PathBuf },
}

/// A dropped request entry and the reason it was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
  pub entry: String,
  pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.reason {
      SkipReason::PathOutsideAllowList => {
        write!(f, "{}: outside the allowed firmware paths", self.entry)
      }
      SkipReason::NoBasename => {
        write!(f, "{}: target has no file name", self.entry)
      }
      SkipReason::MissingSource { source } => {
        write!(f, "{}: source {} not found", self.entry, source.display())
      }
    }
  }
}

/// Build forward and restore operation lists from a request.
///
/// Operation order is fixed: removes, adds, commands, scripts, then a single
/// modify-defaults entry. Output is deterministic given deterministic input
/// order.
pub fn build(request: &PatchRequest, config: &Config) -> PatchBuild {
  let mut build = PatchBuild::default();

  for path in &request.remove_files {
    if !is_valid_target(path, config) {
      skip(&mut build, path, SkipReason::PathOutsideAllowList);
      continue;
    }

    build.operations.push(Operation::Remove { path: path.clone() });
    // The device is expected to have backed the file up here before the
    // removal ran; content is not recoverable from the manifest itself.
    let backup_source = format!("{}{}", config.backup_dir, path.replace('/', "_"));
    build.restore_operations.push(Operation::Add {
      path: path.clone(),
      source: backup_source,
      checksum: None,
      size: None,
    });
  }

  if let Some(add_dir) = request.add_dir.as_deref() {
    for target in &request.add_files {
      add_operation(&mut build, target, add_dir, config);
    }
  }

  for command in &request.commands {
    build.operations.push(Operation::Command {
      command: command.clone(),
    });
  }

  for script in &request.scripts {
    build.operations.push(Operation::Script {
      script_name: script.name.clone(),
      script_content: script.content.clone(),
    });
  }

  if !request.modify_defaults.is_empty() {
    build.operations.push(Operation::ModifyDefaults {
      entries: request.modify_defaults.clone(),
    });
  }

  build
}

fn add_operation(build: &mut PatchBuild, target: &str, add_dir: &Path, config: &Config) {
  if !is_valid_target(target, config) {
    skip(build, target, SkipReason::PathOutsideAllowList);
    return;
  }

  let target_path = Path::new(target);
  let Some(name) = target_path.file_name() else {
    skip(build, target, SkipReason::NoBasename);
    return;
  };

  let source_path = add_dir.join(name);
  let Ok(metadata) = fs::metadata(&source_path) else {
    skip(build, target, SkipReason::MissingSource { source: source_path });
    return;
  };

  let target_dir = target_path
    .parent()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_default();
  let name = name.to_string_lossy();

  build.operations.push(Operation::Add {
    path: target_dir.clone(),
    source: format!("{}/{}", config.staging_dir, name),
    checksum: Some(file_checksum(&source_path)),
    size: Some(metadata.len()),
  });
  build.restore_operations.push(Operation::Remove {
    path: format!("{}/{}", target_dir, name),
  });
}

fn skip(build: &mut PatchBuild, entry: &str, reason: SkipReason) {
  let skipped = SkippedEntry {
    entry: entry.to_string(),
    reason,
  };
  warn!(entry = %skipped.entry, "{}", skipped);
  build.skipped.push(skipped);
}
