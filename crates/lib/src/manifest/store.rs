//! Manifest storage on disk.
//!
//! Manifests are pretty-printed JSON (2-space indent). Saving writes the
//! whole file through a temp-then-rename to avoid leaving a torn document
//! behind. There is no locking; concurrent writers race.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Manifest;

/// Error while reading or writing a manifest file.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse manifest {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error("failed to serialize manifest: {0}")]
  Serialize(serde_json::Error),

  #[error("failed to write manifest {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },
}

/// Load a manifest, failing on any read or parse problem.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
  let content = fs::read_to_string(path).map_err(|e| ManifestError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Load a manifest, treating a missing or malformed file as a fresh one.
///
/// The builder merges new operations into whatever already exists at the
/// output path; a manifest that cannot be read is not worth failing over.
pub fn load_or_default(path: &Path) -> Manifest {
  match load(path) {
    Ok(manifest) => manifest,
    Err(e) => {
      debug!(path = %path.display(), error = %e, "starting from a fresh manifest");
      Manifest::default()
    }
  }
}

/// Save a manifest as pretty-printed JSON.
///
/// Uses atomic write (write to temp, then rename) to prevent corruption.
pub fn save(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
  let content = serde_json::to_string_pretty(manifest).map_err(ManifestError::Serialize)?;

  let mut temp_path = path.as_os_str().to_os_string();
  temp_path.push(".tmp");
  let temp_path = PathBuf::from(temp_path);

  fs::write(&temp_path, &content).map_err(|e| ManifestError::Write {
    path: path.to_path_buf(),
    source: e,
  })?;
  fs::rename(&temp_path, path).map_err(|e| ManifestError::Write {
    path: path.to_path_buf(),
    source: e,
  })?;

  Ok(())
}
