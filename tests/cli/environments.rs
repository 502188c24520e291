//! Tests for `psec environments` commands.

use crate::support::*;
use std::fs;

#[test]
fn test_create_and_list() {
    let t = Test::init();

    assert_success(&t.psec(&["environments", "create", "alpha", "beta"]));

    let output = t.psec(&["environments", "list"]);
    assert_success(&output);
    assert_stdout_contains(&output, "alpha");
    assert_stdout_contains(&output, "beta");
}

#[test]
fn test_list_empty() {
    let t = Test::init();

    let output = t.psec(&["environments", "list"]);
    assert_success(&output);
    assert_stderr_contains(&output, "no environments found");
}

#[test]
fn test_create_twice_fails() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["environments", "create", "demo"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_create_with_clone_copies_groups() {
    let t = Test::with_environment("demo");

    assert!(t.env_file("demo", "secrets.d/app.json").is_file());
    assert!(t.env_file("demo", "secrets.d/db.json").is_file());

    // Cloning reconciles every described variable as unset.
    let secrets: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(t.env_file("demo", "secrets.json")).unwrap())
            .unwrap();
    assert!(secrets["app_pw"].is_null());
    assert!(secrets["db_digest"].is_null());
}

#[test]
fn test_clone_from_other_environment() {
    let t = Test::with_environment("demo");

    assert_success(&t.psec(&["environments", "create", "copy", "--clone-from", "demo"]));
    assert!(t.env_file("copy", "secrets.d/app.json").is_file());
}

#[test]
fn test_clone_from_plain_directory_fails() {
    let t = Test::init();
    fs::create_dir(t.dir.path().join("plain")).unwrap();

    let output = t
        .cmd()
        .args(["environments", "create", "demo", "--clone-from"])
        .arg(t.dir.path().join("plain"))
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "unsupported clone source");
}

#[test]
fn test_alias_shares_values() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["environments", "create", "live", "--clone-from", "demo", "--alias"]);
    assert_success(&output);
    assert_stderr_contains(&output, "alias for");

    let output = t.psec(&["environments", "list", "--json"]);
    assert_success(&output);
    let listed = stdout_json(&output);
    let live = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "live")
        .unwrap();
    assert_eq!(live["alias_for"], "demo");

    assert_success(&t.set("live", "app_user=bob"));
    assert_eq!(t.value("demo", "app_user"), "bob");
}

#[test]
fn test_alias_requires_clone_source() {
    let t = Test::init();

    let output = t.psec(&["environments", "create", "live", "--alias"]);
    assert_failure(&output);
}

#[test]
fn test_delete_requires_force() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["environments", "delete", "demo"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--force");
    assert!(t.base_dir().join("demo").exists());

    assert_success(&t.psec(&["environments", "delete", "demo", "--force"]));
    assert!(!t.base_dir().join("demo").exists());
}

#[test]
fn test_delete_missing_environment_fails() {
    let t = Test::init();

    let output = t.psec(&["environments", "delete", "ghost", "--force"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "environment not found");
}

#[test]
fn test_default_environment_roundtrip() {
    let t = Test::with_environment("demo");

    assert_success(&t.psec(&["environments", "default", "demo"]));
    assert_eq!(
        fs::read_to_string(t.dir.path().join(".psec-environment"))
            .unwrap()
            .trim(),
        "demo"
    );

    // Commands without -e now use the saved default.
    let output = t.psec(&["secrets", "show"]);
    assert_success(&output);
    assert_stdout_contains(&output, "app_pw");

    let output = t.psec(&["environments", "default"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "demo");

    assert_success(&t.psec(&["environments", "default", "--unset"]));
    assert!(!t.dir.path().join(".psec-environment").exists());
}

#[test]
fn test_default_requires_existing_environment() {
    let t = Test::init();

    let output = t.psec(&["environments", "default", "ghost"]);
    assert_failure(&output);
    assert!(!t.dir.path().join(".psec-environment").exists());
}

#[test]
fn test_environment_variable_selects_environment() {
    let t = Test::with_environment("demo");

    let output = t
        .cmd()
        .env("D2_ENVIRONMENT", "demo")
        .args(["secrets", "show"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "app_token");
}

#[test]
fn test_path_and_tmpdir() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["environments", "path", "demo"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim(),
        t.base_dir().join("demo").display().to_string()
    );

    let output = t.psec(&["environments", "path", "demo", "--tmpdir"]);
    assert_success(&output);
    assert!(t.base_dir().join("demo").join("tmp").is_dir());
}

#[test]
fn test_names_outside_base_dir_are_rejected() {
    let t = Test::with_environment("demo");
    let victim = t.home.path().join("victim");
    fs::create_dir(&victim).unwrap();
    fs::write(victim.join("keep.txt"), "x").unwrap();

    let output = t.psec(&["environments", "delete", "../victim", "--force"]);
    assert_fails_with(&output, "invalid environment name");
    assert!(victim.join("keep.txt").is_file());

    let output = t.psec(&["environments", "create", "../escape"]);
    assert_fails_with(&output, "invalid environment name");
    assert!(!t.home.path().join("escape").exists());
}

#[test]
fn test_failed_clone_leaves_no_group_files() {
    let t = Test::init();
    let source = t.dir.path().join("conflict.d");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("a.json"), r#"[{"Variable": "x", "Type": "string"}]"#).unwrap();
    fs::write(source.join("b.json"), r#"[{"Variable": "x", "Type": "password"}]"#).unwrap();

    let output = t
        .cmd()
        .args(["environments", "create", "copy", "--clone-from"])
        .arg(&source)
        .output()
        .unwrap();
    assert_fails_with(&output, "described in both");

    let groups = fs::read_dir(t.env_file("copy", "secrets.d")).unwrap().count();
    assert_eq!(groups, 0);
}
