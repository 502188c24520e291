//! Tests for `psec init` and base directory handling.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_init_creates_marker() {
    let t = Test::new();

    t.cmd()
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("initialized"));
    assert!(t.base_dir().join(".psec.toml").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let t = Test::init();

    t.cmd()
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_init_explicit_directory() {
    let t = Test::new();
    let target = t.dir.path().join("elsewhere");

    let output = t.cmd().arg("init").arg(&target).output().unwrap();
    assert_success(&output);
    assert!(target.join(".psec.toml").is_file());
    assert!(!t.base_dir().exists());
}

#[cfg(unix)]
#[test]
fn test_init_directory_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::init();
    let mode = std::fs::metadata(t.base_dir()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o700);
}

#[test]
fn test_missing_base_dir_suggests_init() {
    let t = Test::new();

    t.cmd()
        .args(["-e", "demo", "environments", "create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found").and(predicate::str::contains("psec init")));
    assert!(!t.base_dir().exists());
}

#[test]
fn test_unmarked_base_dir_is_rejected() {
    let t = Test::new();
    std::fs::create_dir_all(t.base_dir()).unwrap();

    let output = t.psec(&["environments", "list"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "marker");
}

#[test]
fn test_init_flag_creates_base_dir_on_demand() {
    let t = Test::new();

    let output = t.psec(&["--init", "environments", "create", "demo"]);
    assert_success(&output);
    assert!(t.base_dir().join(".psec.toml").is_file());
    assert!(t.base_dir().join("demo").join("secrets.d").is_dir());
}
