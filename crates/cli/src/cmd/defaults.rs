//! Implementation of the `fwpatch defaults` subcommands.
//!
//! `compare` records, for every key a manifest's modify-defaults operation
//! touches, the current value in the device's defaults file next to the
//! requested one. `restore` later rewrites the defaults file from that
//! comparison, undoing the patch's edits while preserving the file's layout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use tracing::debug;

use fwpatch_lib::config::Config;
use fwpatch_lib::defaults::{compare, file};
use fwpatch_lib::manifest::{Operation, store};

use crate::output::{print_info, print_success};

#[derive(Subcommand, Debug)]
pub enum DefaultsCommand {
  /// Compare a manifest's default-value edits against the defaults file
  Compare {
    /// Patch manifest to read the modify-defaults operation from
    #[arg(long, value_name = "FILE")]
    manifest: PathBuf,

    /// Defaults file to compare against (device default when omitted)
    #[arg(long, value_name = "FILE")]
    defaults: Option<PathBuf>,

    /// Where to write the comparison document
    #[arg(long, value_name = "FILE", default_value = "/tmp/defaultvalues_comparison.json")]
    output: PathBuf,
  },

  /// Rewrite the defaults file from a previously generated comparison
  Restore {
    /// Comparison document produced by `defaults compare`
    #[arg(long, value_name = "FILE", default_value = "defaultvalues_comparison.json")]
    comparison: PathBuf,

    /// Defaults file to rewrite (device default when omitted)
    #[arg(long, value_name = "FILE")]
    defaults: Option<PathBuf>,
  },
}

pub fn cmd_defaults(command: DefaultsCommand) -> Result<()> {
  match command {
    DefaultsCommand::Compare {
      manifest,
      defaults,
      output,
    } => cmd_compare(&manifest, defaults, &output),
    DefaultsCommand::Restore { comparison, defaults } => cmd_restore(&comparison, defaults),
  }
}

fn defaults_path(overridden: Option<PathBuf>) -> PathBuf {
  overridden.unwrap_or_else(|| Config::default().defaults_path)
}

fn cmd_compare(manifest_path: &Path, defaults: Option<PathBuf>, output: &Path) -> Result<()> {
  let defaults_path = defaults_path(defaults);

  let manifest = store::load(manifest_path).context("Failed to load manifest")?;

  let entries = manifest.operations.iter().find_map(|op| match op {
    Operation::ModifyDefaults { entries } => Some(entries),
    _ => None,
  });
  let Some(entries) = entries else {
    print_info("No modify_defaults operation found in the manifest");
    return Ok(());
  };

  let current = file::parse_defaults(&defaults_path).context("Failed to parse defaults file")?;
  debug!(sections = current.len(), "parsed defaults file");

  let comparison = compare::generate(entries, &current);
  compare::save(output, &comparison).context("Failed to write comparison file")?;

  print_success(&format!("Comparison file created: {}", output.display()));

  Ok(())
}

fn cmd_restore(comparison_path: &Path, defaults: Option<PathBuf>) -> Result<()> {
  let defaults_path = defaults_path(defaults);

  if !comparison_path.exists() {
    bail!(
      "{} does not exist. Run 'fwpatch defaults compare' first or pass --comparison",
      comparison_path.display()
    );
  }

  let comparison = compare::load(comparison_path).context("Failed to load comparison file")?;
  file::apply_comparison(&defaults_path, &comparison).context("Failed to update defaults file")?;

  print_success(&format!(
    "Updated {} from {}",
    defaults_path.display(),
    comparison_path.display()
  ));

  Ok(())
}
