//! Implementation of the `fwpatch create` command.
//!
//! Gathers the requested operations, builds the forward and restore
//! operation lists, and writes both manifests. Invalid entries are warned
//! about and dropped; only an unusable add directory, missing interactive
//! script content, or a failed manifest write is fatal.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use fwpatch_lib::builder::{self, PatchRequest, ScriptEntry};
use fwpatch_lib::config::Config;
use fwpatch_lib::defaults::entries::parse_entries;
use fwpatch_lib::manifest::{Manifest, store};

use crate::output::{print_stat, print_success, print_warning};
use crate::prompts::{prompt_line, read_to_eof};

#[derive(Args, Debug)]
pub struct CreateArgs {
  /// Device paths to remove
  #[arg(long, value_name = "PATH", num_args = 1..)]
  remove: Vec<String>,

  /// Device paths to add (targets within the allowed firmware locations)
  #[arg(long, value_name = "PATH", num_args = 1..)]
  add: Vec<String>,

  /// Local directory containing the files to add, matched by basename
  /// (prompted for when --add is given without it)
  #[arg(long, value_name = "DIR")]
  add_dir: Option<PathBuf>,

  /// Shell commands to embed verbatim
  #[arg(long = "command", value_name = "CMD", num_args = 1..)]
  commands: Vec<String>,

  /// Script files to embed; with no arguments, the script is entered
  /// interactively (name prompt, then content from stdin until EOF)
  #[arg(long = "script", value_name = "PATH", num_args = 0..)]
  scripts: Option<Vec<PathBuf>>,

  /// Default-value edits in [section:]key=value form
  #[arg(long = "modify-defaults", value_name = "ENTRY", num_args = 1..)]
  modify_defaults: Vec<String>,

  /// Output manifest file
  #[arg(long, value_name = "FILE", default_value = "patch_manifest.json")]
  manifest: PathBuf,
}

/// Execute the create command.
///
/// The forward manifest is merged into whatever already exists at the output
/// path (its version tag survives; operations are replaced). The restore
/// manifest is always written fresh next to it. The forward write landing
/// while the restore write fails is an accepted inconsistency; nothing is
/// rolled back.
pub fn cmd_create(args: CreateArgs) -> Result<()> {
  let config = Config::default();

  let scripts = gather_scripts(args.scripts.as_deref())?;
  let add_dir = gather_add_dir(&args.add, args.add_dir)?;

  let parsed = parse_entries(&args.modify_defaults);
  for entry in &parsed.invalid {
    print_warning(&format!("Skipping invalid modify-defaults entry '{}'", entry));
  }

  let request = PatchRequest {
    remove_files: args.remove,
    add_files: args.add,
    add_dir,
    commands: args.commands,
    scripts,
    modify_defaults: parsed.entries,
  };

  let build = builder::build(&request, &config);
  for skipped in &build.skipped {
    print_warning(&format!("Skipping {}", skipped));
  }

  let mut manifest = store::load_or_default(&args.manifest);
  manifest.operations = build.operations;
  store::save(&args.manifest, &manifest)
    .with_context(|| format!("Failed to save manifest {}", args.manifest.display()))?;
  print_success(&format!(
    "Firmware patch manifest updated: {}",
    args.manifest.display()
  ));

  let restore_path = PathBuf::from(&config.restore_manifest_name);
  let restore = Manifest::with_operations(build.restore_operations);
  store::save(&restore_path, &restore)
    .with_context(|| format!("Failed to save restore manifest {}", restore_path.display()))?;
  print_success(&format!(
    "Firmware restore manifest created: {}",
    restore_path.display()
  ));

  println!();
  print_stat("Operations", &manifest.operations.len().to_string());
  print_stat("Restore operations", &restore.operations.len().to_string());
  if !build.skipped.is_empty() {
    print_stat("Skipped entries", &build.skipped.len().to_string());
  }

  info!(manifest = %args.manifest.display(), "manifests written");

  Ok(())
}

/// Collect script entries from files, or interactively when `--script` was
/// given with no arguments.
fn gather_scripts(paths: Option<&[PathBuf]>) -> Result<Vec<ScriptEntry>> {
  let Some(paths) = paths else {
    return Ok(Vec::new());
  };

  if paths.is_empty() {
    let name = prompt_line("Enter script name (e.g., my_script.sh):")?;
    eprintln!("Enter script content below. Press Ctrl+D on a new line to finish:");
    let content = read_to_eof()?;
    if name.is_empty() || content.trim().is_empty() {
      bail!("No script content provided");
    }
    return Ok(vec![ScriptEntry { name, content }]);
  }

  let mut scripts = Vec::new();
  for path in paths {
    if !path.exists() {
      print_warning(&format!("Script {} not found, skipping", path.display()));
      continue;
    }
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read script {}", path.display()))?;
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();
    scripts.push(ScriptEntry { name, content });
  }
  Ok(scripts)
}

/// Resolve the add directory, prompting when targets were given without one.
///
/// A supplied or entered directory that does not exist is fatal before any
/// manifest mutation.
fn gather_add_dir(add_files: &[String], add_dir: Option<PathBuf>) -> Result<Option<PathBuf>> {
  if add_files.is_empty() {
    return Ok(None);
  }

  let dir = match add_dir {
    Some(dir) => dir,
    None => PathBuf::from(prompt_line(
      "Enter the local directory containing files to be added:",
    )?),
  };

  if !dir.is_dir() {
    bail!("Add directory does not exist: {}", dir.display());
  }

  Ok(Some(dunce::canonicalize(&dir).unwrap_or(dir)))
}
