//! Manifest data model.
//!
//! # Serialization
//!
//! Manifests are plain JSON documents:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "operations": [
//!     { "operation": "remove", "path": "/sda1/data/apps/old.bin" },
//!     { "operation": "add", "path": "/sda1/data/core", "source": "/tmp/new.bin",
//!       "checksum": "…64 hex chars…", "size": 10 }
//!   ]
//! }
//! ```
//!
//! Operations are an internally tagged enum keyed by `"operation"`. Restore
//! `add` operations synthesized for removals carry neither checksum nor size
//! (the backup content is unknown at creation time), so both fields are
//! optional and omitted when absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Version tag written into freshly created manifests.
pub const MANIFEST_VERSION: &str = "1.0";

/// An ordered patch manifest.
///
/// `operations` order is significant: it is the application order on the
/// device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  pub version: String,
  pub operations: Vec<Operation>,
}

impl Default for Manifest {
  fn default() -> Self {
    Self {
      version: MANIFEST_VERSION.to_string(),
      operations: Vec::new(),
    }
  }
}

impl Manifest {
  /// Create a manifest with the given operations and the current version tag.
  pub fn with_operations(operations: Vec<Operation>) -> Self {
    Self {
      version: MANIFEST_VERSION.to_string(),
      operations,
    }
  }
}

/// One step of a patch.
///
/// Paths inside operations are device paths and stay plain strings; they are
/// never resolved against the host filesystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Operation {
  /// Delete a file on the device.
  Remove { path: String },
  /// Install a staged file into a target directory.
  Add {
    /// Target directory on the device.
    path: String,
    /// Staging location the device reads the file from.
    source: String,
    /// SHA-256 of the file content, lowercase hex.
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
    /// File size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
  },
  /// Run a shell command on the device.
  Command { command: String },
  /// Write an embedded script to the device.
  Script {
    script_name: String,
    script_content: String,
  },
  /// Edit default-values entries, grouped section -> key -> value.
  ///
  /// `BTreeMap` keeps serialization deterministic for identical inputs.
  ModifyDefaults {
    entries: BTreeMap<String, BTreeMap<String, String>>,
  },
}
