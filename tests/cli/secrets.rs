//! Tests for `psec secrets` commands.

use crate::support::*;
use sha2::{Digest, Sha256};
use std::fs;

// Setting and reading values

#[test]
fn test_set_and_get_roundtrip() {
    let t = Test::with_environment("demo");

    let output = t.set("demo", "app_user=alice");
    assert_success(&output);
    assert_stderr_contains(&output, "app_user");

    assert_eq!(t.value("demo", "app_user"), "alice");
}

#[test]
fn test_set_multiple_and_values_with_equals() {
    let t = Test::with_environment("demo");

    let output = t.psec(&[
        "-e",
        "demo",
        "secrets",
        "set",
        "app_user=alice",
        "db_user=postgres://u:p@host/db?x=1",
    ]);
    assert_success(&output);
    assert_eq!(t.value("demo", "db_user"), "postgres://u:p@host/db?x=1");
}

#[test]
fn test_set_copies_with_at_reference() {
    let t = Test::with_environment("demo");

    assert_roundtrip(&t, "demo", "app_user", "alice");
    assert_success(&t.set("demo", "db_user=@app_user"));
    assert_eq!(t.value("demo", "db_user"), "alice");
}

#[test]
fn test_set_undescribed_variable_fails() {
    let t = Test::with_environment("demo");

    assert_fails_with(&t.set("demo", "mystery=1"), "not described");
}

#[test]
fn test_set_malformed_assignment_fails() {
    let t = Test::with_environment("demo");

    assert_fails_with(&t.set("demo", "app_user"), "VARIABLE=VALUE");
}

#[test]
fn test_set_respects_options() {
    let t = Test::with_environment("demo");

    let output = t.set("demo", "app_region=mars-1");
    assert_failure(&output);
    assert_stderr_contains(&output, "not an allowed value");

    assert_success(&t.set("demo", "app_region=eu-west-1"));
    assert_eq!(t.value("demo", "app_region"), "eu-west-1");
}

#[test]
fn test_get_unset_value_fails() {
    let t = Test::with_environment("demo");

    let output = t.get("demo", "app_user");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found");
}

#[test]
fn test_get_unknown_suggests() {
    let t = Test::with_environment("demo");

    let output = t.get("demo", "token");
    assert_failure(&output);
    assert_stderr_contains(&output, "did you mean");
    assert_stderr_contains(&output, "app_token");
}

// Showing

#[test]
fn test_show_redacts_by_default() {
    let t = Test::with_environment("demo");
    assert_success(&t.set("demo", "app_user=alice"));

    let output = t.show("demo", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "REDACTED");
    assert_stdout_excludes(&output, "alice");

    let output = t.show("demo", &["--no-redact"]);
    assert_success(&output);
    assert_stdout_contains(&output, "alice");
}

#[test]
fn test_show_filters_by_group() {
    let t = Test::with_environment("demo");

    let output = t.show("demo", &["--group", "db"]);
    assert_success(&output);
    assert_stdout_contains(&output, "db_digest");
    assert_stdout_excludes(&output, "app_token");

    let output = t.show("demo", &["--group", "nope"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "group not found");
}

#[test]
fn test_show_json() {
    let t = Test::with_environment("demo");
    assert_success(&t.set("demo", "app_pw=hunter2"));

    let output = t.show("demo", &["app_pw", "--json", "--no-redact"]);
    assert_success(&output);
    let shown = stdout_json(&output);
    assert_eq!(shown.as_array().unwrap().len(), 1);
    assert_eq!(shown[0]["Variable"], "app_pw");
    assert_eq!(shown[0]["Type"], "password");
    assert_eq!(shown[0]["Value"], "hunter2");
    assert_eq!(shown[0]["Export"], "APP_PASSWORD");
}

// Unsetting

#[test]
fn test_unset_requires_force() {
    let t = Test::with_environment("demo");
    assert_success(&t.set("demo", "app_user=alice"));

    let output = t.psec(&["-e", "demo", "secrets", "unset", "app_user"]);
    assert_failure(&output);
    assert_eq!(t.value("demo", "app_user"), "alice");

    assert_success(&t.psec(&["-e", "demo", "secrets", "unset", "app_user", "--force"]));
    assert_failure(&t.get("demo", "app_user"));
}

// Generating

#[test]
fn test_generate_fills_generable_variables() {
    let t = Test::with_environment("demo");

    let output = t.generate("demo", &[]);
    assert_success(&output);
    // db_digest has no --user/--credential and is skipped.
    assert_stderr_contains(&output, "skipping");

    let token = t.value("demo", "app_token");
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

    let password = t.value("demo", "app_pw");
    assert_eq!(password.split('.').count(), 4);

    // Plain strings are never generated.
    assert_failure(&t.get("demo", "app_user"));
    assert_failure(&t.get("demo", "db_digest"));
}

#[test]
fn test_generate_named_variable_with_password_shape() {
    let t = Test::with_environment("demo");

    let output = t.generate(
        "demo",
        &["app_pw", "--words", "3", "--delimiter", "-", "--unique"],
    );
    assert_success(&output);

    let password = t.value("demo", "app_pw");
    let words: Vec<&str> = password.split('-').collect();
    assert_eq!(words.len(), 3);
    assert!(words.iter().all(|w| (3..=6).contains(&w.len())));
    assert_failure(&t.get("demo", "app_token"));
}

#[test]
fn test_generate_digest_with_inputs() {
    let t = Test::with_environment("demo");

    let output = t.generate(
        "demo",
        &["db_digest", "--user", "admin", "--credential", "s3cret"],
    );
    assert_success(&output);
    assert_eq!(
        t.value("demo", "db_digest"),
        hex::encode(Sha256::digest(b"admin:s3cret"))
    );
}

#[test]
fn test_generate_named_digest_without_inputs_fails() {
    let t = Test::with_environment("demo");

    let output = t.generate("demo", &["db_digest"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "user");
}

#[test]
fn test_generate_plain_string_is_skipped() {
    let t = Test::with_environment("demo");

    let output = t.generate("demo", &["app_user"]);
    assert_success(&output);
    assert_stderr_contains(&output, "no generable variables");
}

#[test]
fn test_generate_bytes_flag() {
    let t = Test::with_environment("demo");

    assert_success(&t.generate("demo", &["app_token", "--bytes", "8"]));
    assert_eq!(t.value("demo", "app_token").len(), 16);
}

// Describing

#[test]
fn test_describe_types() {
    let t = Test::init();

    let output = t.psec(&["secrets", "describe", "--types"]);
    assert_success(&output);
    for kind in ["password", "crypt_6", "token_urlsafe", "zookeeper_digest", "uuid4"] {
        assert_stdout_contains(&output, kind);
    }

    let output = t.psec(&["secrets", "describe", "--types", "--json"]);
    assert_success(&output);
    let types = stdout_json(&output);
    let string = types
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["Type"] == "string")
        .unwrap();
    assert_eq!(string["Generable"], false);
}

#[test]
fn test_describe_variable() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "secrets", "describe", "app_pw", "--json"]);
    assert_success(&output);
    let described = stdout_json(&output);
    assert_eq!(described[0]["Variable"], "app_pw");
    assert_eq!(described[0]["Group"], "app");
    assert_eq!(described[0]["Prompt"], "Application password");

    let output = t.psec(&["-e", "demo", "secrets", "describe", "nothing"]);
    assert_failure(&output);
}

#[test]
fn test_secrets_path() {
    let t = Test::with_environment("demo");

    let output = t.psec(&["-e", "demo", "secrets", "path"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output).trim(),
        t.env_file("demo", "secrets.json").display().to_string()
    );
}

#[test]
fn test_wildcard_option_allows_any_value() {
    let t = Test::with_environment("demo");
    fs::write(
        t.env_file("demo", "secrets.d/size.json"),
        r#"[{"Variable": "size", "Type": "string", "Options": "small,large,*"}]"#,
    )
    .unwrap();

    assert_success(&t.set("demo", "size=medium"));
    assert_eq!(t.value("demo", "size"), "medium");
}
