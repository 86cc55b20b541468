//! Integration tests for the getpot CLI

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn getpot_cmd(config: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("getpot");
    cmd.env("GETPOT_CONFIG", config);
    cmd
}

fn empty_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("getpot.toml");
    std::fs::write(&path, "").unwrap();
    path
}

#[cfg(unix)]
fn write_helper(dir: &TempDir, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.path().join("helper");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("getpot"));
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PO token bridge"));
}

#[test]
fn test_invalid_command() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .arg("invalid")
        .assert()
        .failure();
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("getpot.toml"));
}

#[test]
fn test_config_show_empty() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("(empty)"));
}

#[test]
fn test_config_show_lists_values() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("getpot.toml");
    std::fs::write(&config, "cli_path = \"/opt/helper\"\n").unwrap();
    getpot_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cli-path = /opt/helper"));
}

#[test]
fn test_config_set_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("getpot.toml");
    getpot_cmd(&config)
        .args(["config", "set", "cli-path", "/opt/helper"])
        .assert()
        .success();
    getpot_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cli-path = /opt/helper"));
}

#[test]
fn test_config_set_rejects_unknown_keys() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .args(["config", "set", "script", "/old/generate.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown or invalid setting"));
}

#[test]
fn test_resolve_reports_override() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .args(["resolve", "--cli-path", "/opt/custom/helper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/custom/helper"));
}

#[test]
fn test_deprecated_settings_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("getpot.toml");
    std::fs::write(&config, "script = \"/old/generate.js\"\n").unwrap();
    getpot_cmd(&config)
        .args(["request", "-c", "cb1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deprecated"))
        .stderr(predicate::str::contains("cli_path"));
}

#[test]
fn test_available_fails_for_missing_helper() {
    let dir = TempDir::new().unwrap();
    getpot_cmd(&empty_config(&dir))
        .args(["available", "--cli-path", "/definitely/not/a/helper"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unavailable"));
}

#[cfg(unix)]
#[test]
fn test_available_succeeds_with_fake_helper() {
    let dir = TempDir::new().unwrap();
    let helper = write_helper(&dir, "echo 'helper 1.0.0'");
    getpot_cmd(&empty_config(&dir))
        .args(["available", "--cli-path"])
        .arg(&helper)
        .assert()
        .success()
        .stdout(predicate::str::contains("bgutil:cli: available"));
}

#[cfg(unix)]
#[test]
fn test_request_prints_exactly_the_token() {
    let dir = TempDir::new().unwrap();
    let helper = write_helper(&dir, "echo diag\necho '{\"poToken\":\"XYZ\"}'");
    let config = dir.path().join("getpot.toml");
    std::fs::write(
        &config,
        format!("cli_path = \"{}\"\n", helper.display()),
    )
    .unwrap();

    getpot_cmd(&config)
        .args(["request", "-c", "cb1"])
        .assert()
        .success()
        .stdout(predicate::eq("XYZ\n"));
}

#[cfg(unix)]
#[test]
fn test_request_failure_reports_exit_status() {
    let dir = TempDir::new().unwrap();
    let helper = write_helper(&dir, "exit 2");
    getpot_cmd(&empty_config(&dir))
        .args(["request", "-c", "cb1", "--cli-path"])
        .arg(&helper)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exit status 2"));
}

#[cfg(unix)]
#[test]
fn test_request_timeout_flag() {
    let dir = TempDir::new().unwrap();
    let helper = write_helper(&dir, "sleep 30");
    getpot_cmd(&empty_config(&dir))
        .args(["request", "-c", "cb1", "--timeout", "1", "--cli-path"])
        .arg(&helper)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timeout"));
}

#[cfg(unix)]
#[test]
fn test_request_via_interpreter() {
    let dir = TempDir::new().unwrap();
    // Not executable by itself; only runs under the interpreter.
    let script = dir.path().join("generate.sh");
    std::fs::write(&script, "echo '{\"poToken\":\"VIA_SH\"}'\n").unwrap();

    getpot_cmd(&empty_config(&dir))
        .args(["request", "-c", "cb1", "--interpreter", "/bin/sh", "--cli-path"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::eq("VIA_SH\n"));
}
