//! Test fixtures and constants.

use std::fs;
use std::path::{Path, PathBuf};

/// Application group: one of each common kind of variable.
pub const APP_GROUP: &str = r#"[
  {"Variable": "app_user", "Type": "string", "Prompt": "Application user"},
  {"Variable": "app_pw", "Type": "password", "Prompt": "Application password", "Export": "APP_PASSWORD"},
  {"Variable": "app_token", "Type": "token_hex"},
  {"Variable": "app_region", "Type": "string", "Options": "us-east-1,eu-west-1"}
]
"#;

/// Database group: needs `--user`/`--credential` to generate the digest.
pub const DB_GROUP: &str = r#"[
  {"Variable": "db_user", "Type": "string"},
  {"Variable": "db_digest", "Type": "sha256_digest", "Help": "Digest of db_user:password"}
]
"#;

/// Extra group used to test `groups create`.
pub const EXTRA_GROUP: &str = r#"[
  {"Variable": "consul_key", "Type": "consul_key"},
  {"Variable": "instance_id", "Type": "uuid4"}
]
"#;

/// Write `templates.d/{app,db}.json` under `dir` and return the directory.
pub fn write_templates(dir: &Path) -> PathBuf {
    let templates = dir.join("templates.d");
    fs::create_dir_all(&templates).expect("failed to create templates dir");
    fs::write(templates.join("app.json"), APP_GROUP).expect("failed to write app group");
    fs::write(templates.join("db.json"), DB_GROUP).expect("failed to write db group");
    templates
}

/// Write a single group file and return its path.
pub fn write_group_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    fs::write(&path, contents).expect("failed to write group file");
    path
}
