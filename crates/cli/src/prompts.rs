//! Interactive stdin helpers.
//!
//! Prompts go to stderr so piped stdout stays clean.

use std::io::{self, Read, Write};

use anyhow::Result;

/// Prompt for a single line of input and return it trimmed.
pub fn prompt_line(message: &str) -> Result<String> {
  write!(io::stderr(), "{} ", message)?;
  io::stderr().flush()?;

  let mut input = String::new();
  io::stdin().read_line(&mut input)?;

  Ok(input.trim().to_string())
}

/// Read the rest of stdin until end-of-input.
pub fn read_to_eof() -> Result<String> {
  let mut content = String::new();
  io::stdin().read_to_string(&mut content)?;
  Ok(content)
}
