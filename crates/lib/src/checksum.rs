//! Content digests for staged source files.
//!
//! The manifest records a SHA-256 checksum per added file so the device can
//! verify integrity after transfer.

use std::fs;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Sentinel digest used when a source file cannot be read.
pub const ZERO_CHECKSUM: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Read buffer size for streaming file hashes.
const CHUNK_SIZE: usize = 4096;

/// Compute the lowercase hex SHA-256 digest of a file.
///
/// Returns [`ZERO_CHECKSUM`] if the file cannot be opened or read; manifest
/// construction proceeds and the caller decides whether to keep the entry.
pub fn file_checksum(path: &Path) -> String {
  let Ok(mut file) = fs::File::open(path) else {
    return ZERO_CHECKSUM.to_string();
  };

  let mut hasher = Sha256::new();
  let mut buffer = [0u8; CHUNK_SIZE];

  loop {
    match file.read(&mut buffer) {
      Ok(0) => break,
      Ok(n) => hasher.update(&buffer[..n]),
      Err(_) => return ZERO_CHECKSUM.to_string(),
    }
  }

  hex::encode(hasher.finalize())
}
