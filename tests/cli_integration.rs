//! Integration tests for the `tb` CLI.
//!
//! Each test points `tb` at a temp store directory and a config path that
//! does not exist, runs it as a subprocess and checks the store afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Get the path to the built `tb` binary.
fn tb_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tb");
    path
}

fn tb(store: &Path, args: &[&str]) -> std::process::Output {
    Command::new(tb_bin())
        .args(args)
        .arg("--store-dir")
        .arg(store)
        .arg("--config")
        .arg(store.join("missing.toml"))
        .output()
        .expect("failed to run tb")
}

#[test]
fn reset_removes_tasks_but_keeps_theme() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("todoApp"),
        r#"{"todos":[{"id":1,"text":"a","completed":false,"dueDate":null}],"nextId":2}"#,
    )
    .unwrap();
    fs::write(dir.path().join("todoAppTheme"), "dark").unwrap();

    let output = tb(dir.path(), &["reset"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cleared stored tasks"));

    assert!(!dir.path().join("todoApp").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("todoAppTheme")).unwrap(),
        "dark"
    );
}

#[test]
fn reset_on_empty_store_succeeds() {
    let dir = TempDir::new().unwrap();
    let output = tb(dir.path(), &["reset"]);
    assert!(output.status.success());
}

#[test]
fn malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[store\nquota_bytes = ").unwrap();

    let output = Command::new(tb_bin())
        .args(["reset", "--store-dir"])
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run tb");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
}

#[test]
fn version_flag() {
    let output = Command::new(tb_bin())
        .arg("--version")
        .output()
        .expect("failed to run tb");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("tb "));
}
