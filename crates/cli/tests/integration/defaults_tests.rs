//! Defaults compare/restore integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

const DEFAULTS: &str = "\
# device defaults
timeout = 30

[Display]
brightness = 50
";

const MANIFEST_WITH_DEFAULTS: &str = r#"{
  "version": "1.0",
  "operations": [
    {
      "operation": "modify_defaults",
      "entries": {
        "Display": { "brightness": "80" },
        "global": { "volume": "5" }
      }
    }
  ]
}"#;

#[test]
#[serial]
fn compare_records_current_and_new_values() {
  let env = TestEnv::new();
  env.write_file(".defaultvalues", DEFAULTS.as_bytes());
  env.write_file("patch_manifest.json", MANIFEST_WITH_DEFAULTS.as_bytes());

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("compare")
    .arg("--manifest")
    .arg("patch_manifest.json")
    .arg("--defaults")
    .arg(".defaultvalues")
    .arg("--output")
    .arg("comparison.json")
    .assert()
    .success()
    .stdout(predicate::str::contains("Comparison file created"));

  let comparison = env.read_json("comparison.json");
  assert_eq!(comparison["Display"]["brightness"]["current_value"], "50");
  assert_eq!(comparison["Display"]["brightness"]["new_value"], "80");
  assert_eq!(comparison["Display"]["brightness"]["exists"], true);
  assert_eq!(comparison["unscoped"]["volume"]["current_value"], "");
  assert_eq!(comparison["unscoped"]["volume"]["exists"], false);
}

#[test]
#[serial]
fn compare_without_modify_defaults_operation_is_informational() {
  let env = TestEnv::new();
  env.write_file(
    "patch_manifest.json",
    br#"{"version": "1.0", "operations": [{"operation": "command", "command": "sync"}]}"#,
  );

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("compare")
    .arg("--manifest")
    .arg("patch_manifest.json")
    .arg("--output")
    .arg("comparison.json")
    .assert()
    .success()
    .stdout(predicate::str::contains("No modify_defaults operation"));

  assert!(!env.temp.path().join("comparison.json").exists());
}

#[test]
#[serial]
fn compare_with_unreadable_manifest_fails() {
  let env = TestEnv::new();
  env.write_file("patch_manifest.json", b"not json");

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("compare")
    .arg("--manifest")
    .arg("patch_manifest.json")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load manifest"));
}

#[test]
#[serial]
fn compare_with_missing_defaults_file_fails() {
  let env = TestEnv::new();
  env.write_file("patch_manifest.json", MANIFEST_WITH_DEFAULTS.as_bytes());

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("compare")
    .arg("--manifest")
    .arg("patch_manifest.json")
    .arg("--defaults")
    .arg("missing-defaults")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to parse defaults file"));
}

#[test]
#[serial]
fn restore_undoes_patch_edits_in_place() {
  let env = TestEnv::new();
  // Defaults file as it looks after the patch ran: brightness changed from
  // 50 to 80, volume introduced.
  env.write_file(
    ".defaultvalues",
    b"# device defaults\ntimeout = 30\nvolume = 5\n\n[Display]\nbrightness = 80\n",
  );
  env.write_file(
    "comparison.json",
    br#"{
      "Display": {
        "brightness": { "current_value": "50", "new_value": "80", "exists": true }
      },
      "unscoped": {
        "volume": { "current_value": "", "new_value": "5", "exists": false }
      }
    }"#,
  );

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("restore")
    .arg("--comparison")
    .arg("comparison.json")
    .arg("--defaults")
    .arg(".defaultvalues")
    .assert()
    .success()
    .stdout(predicate::str::contains("Updated"));

  let content = env.read_file(".defaultvalues");
  assert!(content.contains("brightness = 50"));
  assert!(!content.contains("volume"));
  assert!(content.contains("# device defaults"));
  assert!(content.contains("timeout = 30"));
}

#[test]
#[serial]
fn restore_without_comparison_file_fails() {
  let env = TestEnv::new();

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("restore")
    .arg("--comparison")
    .arg("missing.json")
    .assert()
    .failure()
    .stderr(predicate::str::contains("does not exist"));
}

#[test]
#[serial]
fn compare_then_restore_roundtrip() {
  let env = TestEnv::new();
  env.write_file(".defaultvalues", DEFAULTS.as_bytes());
  env.write_file("patch_manifest.json", MANIFEST_WITH_DEFAULTS.as_bytes());

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("compare")
    .arg("--manifest")
    .arg("patch_manifest.json")
    .arg("--defaults")
    .arg(".defaultvalues")
    .arg("--output")
    .arg("comparison.json")
    .assert()
    .success();

  // Simulate the device applying the patch's edits.
  env.write_file(
    ".defaultvalues",
    b"# device defaults\ntimeout = 30\nvolume = 5\n\n[Display]\nbrightness = 80\n",
  );

  env
    .fwpatch_cmd()
    .arg("defaults")
    .arg("restore")
    .arg("--comparison")
    .arg("comparison.json")
    .arg("--defaults")
    .arg(".defaultvalues")
    .assert()
    .success();

  let content = env.read_file(".defaultvalues");
  assert!(content.contains("brightness = 50"));
  assert!(!content.contains("volume = 5"));
}
