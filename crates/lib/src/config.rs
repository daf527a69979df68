//! Device path configuration.
//!
//! All lib entry points take a [`Config`] rather than reading compiled-in
//! constants, so tests can point the builder at temporary locations.

use std::path::PathBuf;

/// Device path configuration for manifest construction.
///
/// `Default` carries the production constants for the target device.
#[derive(Debug, Clone)]
pub struct Config {
  /// Directory prefixes a `remove`/`add` target must fall under.
  ///
  /// Matching is a raw string-prefix test on the normalized path, so each
  /// entry is expected to carry its trailing separator. A prefix without one
  /// would also admit sibling directories sharing the prefix string.
  pub allowed_prefixes: Vec<String>,
  /// Directory on the device holding backups of removed files.
  ///
  /// The restore `add` source is formed by direct concatenation, so this
  /// also carries its trailing separator.
  pub backup_dir: String,
  /// Directory on the device where staged files are expected at apply time.
  pub staging_dir: String,
  /// File name of the restore manifest, written in the current directory.
  pub restore_manifest_name: String,
  /// Location of the device's default-values file.
  pub defaults_path: PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      allowed_prefixes: vec![
        "/sda1/data/apps/".to_string(),
        "/sda1/data/basic/".to_string(),
        "/sda1/data/core/".to_string(),
        "/sda1/boot/".to_string(),
      ],
      backup_dir: "/sda1/data/restore/backup/".to_string(),
      staging_dir: "/tmp".to_string(),
      restore_manifest_name: "patch_restore_manifest.json".to_string(),
      defaults_path: PathBuf::from("/sda1/data/.defaultvalues"),
    }
  }
}
