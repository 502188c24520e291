//! Tests for `psec groups` commands.

use crate::support::*;

#[test]
fn test_list_groups_with_counts() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "groups", "list", "--json"]);
    assert_success(&output);
    let groups = stdout_json(&output);
    assert_eq!(groups[0]["group"], "app");
    assert_eq!(groups[0]["items"], 4);
    assert_eq!(groups[1]["group"], "db");
    assert_eq!(groups[1]["items"], 2);
}

#[test]
fn test_show_group() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "groups", "show", "db"]);
    assert_success(&output);
    assert_stdout_contains(&output, "db_user");
    assert_stdout_contains(&output, "sha256_digest");
    assert_stdout_excludes(&output, "app_pw");
}

#[test]
fn test_create_group_from_file() {
    let t = Test::with_environment("demo");
    let path = write_group_file(t.dir.path(), "extra", EXTRA_GROUP);

    let output = t
        .cmd()
        .args(["-e", "demo", "groups", "create", "extra", "--clone-from"])
        .arg(&path)
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "2 variables");
    assert!(t.env_file("demo", "secrets.d/extra.json").is_file());

    assert_success(&t.generate("demo", &["consul_key", "instance_id"]));
    assert_eq!(t.value("demo", "instance_id").len(), 36);
}

#[test]
fn test_create_group_from_environment() {
    let t = Test::with_environment("demo");
    assert_success(&t.psec(&["environments", "create", "other"]));

    let output = t.psec(&["-e", "other", "groups", "create", "db", "--clone-from", "demo"]);
    assert_success(&output);

    let output = t.show("other", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "db_digest");
    assert_stdout_excludes(&output, "app_pw");
}

#[test]
fn test_create_existing_group_fails() {
    let t = Test::with_environment("demo");
    let path = write_group_file(t.dir.path(), "app", EXTRA_GROUP);

    let output = t
        .cmd()
        .args(["-e", "demo", "groups", "create", "app", "--clone-from"])
        .arg(&path)
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_create_group_with_described_variable_fails() {
    let t = Test::with_environment("demo");
    let path = write_group_file(
        t.dir.path(),
        "dupe",
        r#"[{"Variable": "app_pw", "Type": "password"}]"#,
    );

    let output = t
        .cmd()
        .args(["-e", "demo", "groups", "create", "dupe", "--clone-from"])
        .arg(&path)
        .output()
        .unwrap();
    assert_failure(&output);
    assert!(!t.env_file("demo", "secrets.d/dupe.json").exists());
}

#[test]
fn test_create_group_requires_source() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "groups", "create", "extra"]);
    assert_failure(&output);
}

#[test]
fn test_delete_group_removes_values() {
    let t = Test::with_environment("demo");
    assert_success(&t.set("demo", "db_user=admin"));

    let output = t.psec(&["-e", "demo", "groups", "delete", "db"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--force");

    assert_success(&t.psec(&["-e", "demo", "groups", "delete", "db", "--force"]));
    assert!(!t.env_file("demo", "secrets.d/db.json").exists());

    let output = t.show("demo", &[]);
    assert_success(&output);
    assert_stdout_excludes(&output, "db_user");
}

#[test]
fn test_groups_path() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "groups", "path"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim(),
        t.env_file("demo", "secrets.d").display().to_string()
    );
}
