//! Error reporting, invalid on-disk state, and the permission audit.

use crate::support::*;
use std::fs;

#[test]
fn test_legacy_secrets_file_blocks_commands() {
    let t = Test::with_environment("demo");
    fs::write(t.env_file("demo", "secrets.yml"), "app_pw: x\n").unwrap();

    let output = t.show("demo", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "old format");
}

#[test]
fn test_unknown_attribute_in_group_file() {
    let t = Test::with_environment("demo");
    fs::write(
        t.env_file("demo", "secrets.d/bad.json"),
        r#"[{"Variable": "x", "Type": "string", "Colour": "red"}]"#,
    )
    .unwrap();

    let output = t.show("demo", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid attribute 'Colour'");
}

#[test]
fn test_empty_group_file() {
    let t = Test::with_environment("demo");
    fs::write(t.env_file("demo", "secrets.d/empty.json"), "[]").unwrap();

    let output = t.show("demo", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "contains no descriptions");
}

#[test]
fn test_unknown_type_suggests_listing_types() {
    let t = Test::with_environment("demo");
    fs::write(
        t.env_file("demo", "secrets.d/odd.json"),
        r#"[{"Variable": "odd", "Type": "telepathy"}]"#,
    )
    .unwrap();

    let output = t.generate("demo", &["odd"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "secret type not found: telepathy");
    assert_stderr_contains(&output, "describe --types");
}

#[test]
fn test_missing_environment() {
    let t = Test::init();

    let output = t.show("ghost", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "environment not found: ghost");
    assert_stderr_contains(&output, "environments create");
}

#[cfg(unix)]
#[test]
fn test_audit_reports_and_fixes_other_access() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_environment("demo");
    let secrets = t.env_file("demo", "secrets.json");
    fs::set_permissions(&secrets, fs::Permissions::from_mode(0o644)).unwrap();

    // Filesystems without permission bits make the audit a no-op.
    let mode = fs::metadata(&secrets).unwrap().permissions().mode();
    if mode & 0o007 == 0 {
        return;
    }

    let output = t.psec(&["audit"]);
    assert_success(&output);
    assert_stdout_contains(&output, "secrets.json");
    assert_stderr_contains(&output, "psec audit --fix");

    assert_success(&t.psec(&["audit", "--fix"]));
    let mode = fs::metadata(&secrets).unwrap().permissions().mode();
    assert_eq!(mode & 0o007, 0);

    let output = t.psec(&["audit"]);
    assert_success(&output);
    assert_stderr_contains(&output, "no paths accessible");
}
