//! Tests for `psec run`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_run_exports_names_and_aliases() {
    let t = Test::with_environment("demo");
    assert_success(&t.set("demo", "app_pw=hunter2"));

    let output = t.psec(&[
        "-e",
        "demo",
        "run",
        "--",
        "sh",
        "-c",
        "echo \"$app_pw|$APP_PASSWORD|${app_user:-unset}\"",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "hunter2|hunter2|unset");
}

#[cfg(unix)]
#[test]
fn test_run_propagates_exit_code() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "run", "--", "sh", "-c", "exit 3"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_run_without_command_fails() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "run"]);
    assert_failure(&output);
}

#[test]
fn test_run_missing_environment_fails() {
    let t = Test::init();

    let output = t.psec(&["-e", "ghost", "run", "--", "true"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "environment not found");
}
