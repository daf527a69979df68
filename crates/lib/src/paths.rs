//! Target path validation.
//!
//! Remove and add targets must fall under one of the allow-listed firmware
//! directories before they are accepted into a manifest.

use std::path::{Component, Path, PathBuf};

use crate::config::Config;

/// Normalize a path lexically, without touching the filesystem.
///
/// Relative paths are anchored at `cwd`; `.` components are dropped and `..`
/// pops the previous component. Symlinks are not resolved.
pub fn normalize_path(path: &Path, cwd: &Path) -> PathBuf {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    cwd.join(path)
  };

  let mut normalized = PathBuf::new();
  for component in absolute.components() {
    match component {
      Component::ParentDir => {
        normalized.pop();
      }
      Component::CurDir => {}
      _ => normalized.push(component),
    }
  }
  normalized
}

/// Check whether a target path lies under one of the allowed prefixes.
///
/// The path is normalized against the current working directory, then
/// string-prefix matched against `config.allowed_prefixes`.
pub fn is_valid_target(path: &str, config: &Config) -> bool {
  let cwd = std::env::current_dir().unwrap_or_default();
  let normalized = normalize_path(Path::new(path), &cwd);
  let normalized = normalized.to_string_lossy();
  config
    .allowed_prefixes
    .iter()
    .any(|prefix| normalized.starts_with(prefix.as_str()))
}
