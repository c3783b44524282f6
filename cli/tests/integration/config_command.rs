//! Integration tests for `drush-alias config` command.
//!
//! All filesystem-touching tests set `DRUSH_ALIAS_CONFIG` to a temp path so
//! they never read or write `~/.drush-alias/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn drush_alias() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("drush-alias"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// `drush-alias config show`
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_without_file_prints_defaults() {
    let (_dir, path) = temp_config_path();
    drush_alias()
        .args(["config", "show"])
        .env("DRUSH_ALIAS_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("alias.docroot_prefix"))
        .stdout(predicate::str::contains("/var/www/html"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn test_config_show_json_lists_every_key() {
    let (_dir, path) = temp_config_path();
    let output = drush_alias()
        .args(["config", "show", "--json"])
        .env("DRUSH_ALIAS_CONFIG", &path)
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["values"]["alias.ssh_options"], "-p 22");
    assert_eq!(value["values"]["alias.dump_dir"], "/mnt/tmp");
    assert!(value["values"]["application.uuid"].is_null());
}

// ---------------------------------------------------------------------------
// `drush-alias config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = temp_config_path();
    drush_alias()
        .args(["config", "set", "alias.path", "/srv/drush"])
        .env("DRUSH_ALIAS_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set alias.path = /srv/drush"));

    let saved = std::fs::read_to_string(&path).expect("config written");
    assert!(saved.contains("/srv/drush"), "got: {saved}");

    drush_alias()
        .args(["config", "show"])
        .env("DRUSH_ALIAS_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/drush"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    drush_alias()
        .args(["config", "set", "api.secret", "hunter2"])
        .env("DRUSH_ALIAS_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting: api.secret"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_value_json_error() {
    let (_dir, path) = temp_config_path();
    let output = drush_alias()
        .args(["--json", "config", "set", "api.timeout_secs", "soon"])
        .env("DRUSH_ALIAS_CONFIG", &path)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "invalid_config_value");
}

#[test]
fn test_config_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    drush_alias()
        .args(["config", "set", "alias.ssh_options", "-p 2222"])
        .env("DRUSH_ALIAS_CONFIG", &path)
        .assert()
        .success();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
