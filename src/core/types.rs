//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// A described variable's name (e.g., `db_password`).
///
/// Unique across all groups of one environment.
pub type VariableName = String;

/// A group name: the base name of a `secrets.d/*.json` file.
pub type GroupName = String;

/// An environment name: a directory directly under the base directory.
pub type EnvironmentName = String;

/// Live value store. `None` marks a described variable with no value yet.
pub type SecretValues = BTreeMap<VariableName, Option<String>>;
