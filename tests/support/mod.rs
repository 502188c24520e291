//! Test support utilities for psec integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working directory and home directory, and the
/// base directory lives inside the temporary home. No process-global state
/// is mutated; child processes get everything through `.env()` and
/// `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Working directory for commands
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment. Nothing is initialized.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Base directory the commands operate on.
    pub fn base_dir(&self) -> PathBuf {
        self.home.path().join(".secrets")
    }

    /// Create a test environment with the base directory initialized.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize base directory: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create a test environment with `name` created from the fixture groups.
    pub fn with_environment(name: &str) -> Self {
        let t = Self::init();
        let templates = write_templates(t.dir.path());
        let output = t
            .cmd()
            .args(["environments", "create", name, "--clone-from"])
            .arg(&templates)
            .output()
            .expect("failed to run psec environments create");
        assert!(
            output.status.success(),
            "Failed to create environment {}: {}",
            name,
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Path of a file inside environment `name`.
    pub fn env_file(&self, name: &str, file: &str) -> PathBuf {
        self.base_dir().join(name).join(file)
    }
}
