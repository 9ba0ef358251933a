//! Integration tests for the `starter` binary.
//!
//! Every test runs offline: the template comes from a cache file written into
//! a temp dir, and `--url` points at a closed loopback port.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use starter_core::test_utils::SAMPLE_BINARY;
use starter_core::test_utils::ZipTestBuilder;
use starter_core::test_utils::sample_template;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

const UNREACHABLE_URL: &str = "http://127.0.0.1:1/archive/master.zip";

fn starter_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("starter");
    cmd.env_remove("STARTER_TEMPLATE_URL")
        .env_remove("STARTER_CACHE_FILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes the sample template as a fresh cache file and returns its path.
fn cached_template(temp: &TempDir) -> PathBuf {
    let cache = temp.path().join("cache").join("master.zip");
    fs::create_dir_all(cache.parent().unwrap()).unwrap();
    fs::write(&cache, sample_template()).unwrap();
    cache
}

fn scaffold_cmd(target: &Path, cache: &Path) -> Command {
    let mut cmd = starter_cmd();
    cmd.arg("--dir")
        .arg(target)
        .arg("--cache-file")
        .arg(cache)
        .arg("--url")
        .arg(UNREACHABLE_URL);
    cmd
}

#[test]
fn test_version_flag() {
    starter_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("starter"));
}

#[test]
fn test_help_flag() {
    starter_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"))
        .stdout(predicate::str::contains("--disable-cache"));
}

#[test]
fn test_completions_flag() {
    starter_cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("starter"));
}

#[test]
fn test_scaffold_from_fresh_cache() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);
    let target = temp.path().join("myapp");

    scaffold_cmd(&target, &cache)
        .arg("--strip-prefix")
        .arg("gostarter-master")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "myapp created successfully in {}!",
            target.display()
        )));

    assert_eq!(
        fs::read_to_string(target.join("go.mod")).unwrap(),
        "module myapp\n\ngo 1.21\n"
    );
    assert!(
        fs::read_to_string(target.join("cmd/main.go"))
            .unwrap()
            .contains("MYAPP_HOME")
    );
    assert_eq!(fs::read(target.join("bin/tool")).unwrap(), SAMPLE_BINARY);
    assert!(!target.join("gostarter-master").exists());
}

#[test]
fn test_scaffold_detects_prefix_for_custom_url() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);
    let target = temp.path().join("svc");

    scaffold_cmd(&target, &cache)
        .args(["--pkg", "billing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("billing created successfully"));

    assert!(
        fs::read_to_string(target.join("README.md"))
            .unwrap()
            .starts_with("# billing")
    );
}

#[test]
fn test_stale_cache_fallback() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);
    let target = temp.path().join("stale");

    let output = scaffold_cmd(&target, &cache)
        .args(["--max-cache-age", "0s"])
        .output()
        .expect("failed to run starter");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("using cached archive instead").count(), 1);
    assert!(target.join("go.mod").exists());
    assert_eq!(fs::read(&cache).unwrap(), sample_template());
}

#[test]
fn test_missing_cache_and_network_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = temp.path().join("nothing-here.zip");
    let target = temp.path().join("app");

    scaffold_cmd(&target, &cache)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to fetch template"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!target.exists());
    assert!(!cache.exists());
}

#[test]
fn test_disable_cache_does_not_fall_back() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);
    let target = temp.path().join("app");

    scaffold_cmd(&target, &cache)
        .arg("--disableCache")
        .assert()
        .failure()
        .stderr(predicate::str::contains("drop --disable-cache"));

    assert!(!target.exists());
}

#[test]
fn test_single_dash_flags() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);
    let target = temp.path().join("legacy");

    starter_cmd()
        .current_dir(temp.path())
        .arg("-dir")
        .arg(&target)
        .args(["-pkg", "oldstyle", "--cache-file"])
        .arg(&cache)
        .args(["--url", UNREACHABLE_URL])
        .assert()
        .success()
        .stdout(predicate::str::contains("oldstyle created successfully"));

    assert!(
        fs::read_to_string(target.join("README.md"))
            .unwrap()
            .starts_with("# oldstyle")
    );
}

#[test]
fn test_single_dash_disable_cache() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);

    starter_cmd()
        .current_dir(temp.path())
        .arg("-disableCache")
        .arg("--cache-file")
        .arg(&cache)
        .args(["--url", UNREACHABLE_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("drop --disable-cache"));

    assert!(!temp.path().join("isableCache").exists());
}

#[test]
fn test_zip_slip_archive_rejected() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = temp.path().join("cache/evil.zip");
    ZipTestBuilder::new()
        .add_file("gostarter-master/ok.md", b"ok")
        .add_file("gostarter-master/../../evil.txt", b"pwned")
        .add_file("gostarter-master/later.md", b"later")
        .write_to(&cache);
    let target = temp.path().join("out/app");

    scaffold_cmd(&target, &cache)
        .args(["--strip-prefix", "gostarter-master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("illegal file path"))
        .stderr(predicate::str::contains("Security violation"));

    assert!(target.join("ok.md").exists());
    assert!(!target.join("later.md").exists());
    assert!(!temp.path().join("evil.txt").exists());
}

#[test]
fn test_corrupt_cache_reports_invalid_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = temp.path().join("master.zip");
    fs::write(&cache, b"<html>not a zip</html>").unwrap();

    scaffold_cmd(&temp.path().join("app"), &cache)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template archive"));
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);
    let target = temp.path().join("jsonapp");

    let output = scaffold_cmd(&target, &cache)
        .arg("--json")
        .output()
        .expect("failed to run starter");

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON document");
    assert_eq!(value["operation"], "scaffold");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["package"], "jsonapp");
    assert_eq!(value["data"]["source"], "cache");
    assert_eq!(value["data"]["files_extracted"], 5);
}

#[test]
fn test_json_error_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = temp.path().join("missing.zip");

    let output = scaffold_cmd(&temp.path().join("app"), &cache)
        .arg("--json")
        .output()
        .expect("failed to run starter");

    assert!(!output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a JSON document");
    assert_eq!(value["status"], "error");
    assert!(value["error"].as_str().unwrap().contains("Failed to fetch template"));
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);

    scaffold_cmd(&temp.path().join("quiet"), &cache)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_empty_package_name_rejected() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let cache = cached_template(&temp);

    scaffold_cmd(&temp.path().join("x"), &cache)
        .args(["--pkg", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
