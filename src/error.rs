//! Error types.
//!
//! A top-level [`Error`] wraps one enum per domain so callers can match on
//! the failure that matters to them and still propagate everything with `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for all psec operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures locating or shaping an environment and its base directory.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("environment not found: {0}")]
    NotFound(String),

    #[error("environment already exists: {0}")]
    AlreadyExists(String),

    #[error("secrets base directory not found: {}", .0.display())]
    BasedirNotFound(PathBuf),

    #[error("not a valid secrets base directory (missing marker file): {}", .0.display())]
    InvalidBasedir(PathBuf),

    #[error("unsupported clone source: {0}")]
    InvalidSource(String),

    #[error("an alias needs an existing environment to point at")]
    AliasWithoutSource,

    #[error("old format secrets file found: {} (convert it to secrets.json first)", .0.display())]
    LegacyFormat(PathBuf),

    #[error("unable to determine an environment name")]
    NoName,

    #[error("invalid environment name: '{0}' (use a single name without path separators)")]
    InvalidName(String),
}

/// Failures reading or changing secret values.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("variable already has a value: {0}")]
    Duplicate(String),

    #[error("variable is not described in any group: {0}")]
    Undescribed(String),

    #[error("environment variable already set: {0}")]
    EnvVarExists(String),

    #[error("expected VARIABLE=VALUE, got: {0}")]
    InvalidAssignment(String),
}

/// Failures loading or validating group description files.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("invalid attribute '{attribute}' in group '{group}'")]
    InvalidAttribute { group: String, attribute: String },

    #[error("group '{group}' is missing required field '{field}'")]
    MissingField { group: String, field: &'static str },

    #[error("group '{0}' contains no descriptions")]
    EmptyGroup(String),

    #[error("invalid group name: {0}")]
    InvalidGroupName(String),

    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("group already exists: {0}")]
    GroupExists(String),

    #[error("variable '{variable}' described in both '{first}' and '{second}'")]
    DuplicateVariable {
        variable: String,
        first: String,
        second: String,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures selecting or running a secret generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("secret type not found: {0}")]
    TypeNotFound(String),

    #[error("{kind} requires a '{argument}' argument")]
    MissingArgument {
        kind: &'static str,
        argument: &'static str,
    },

    #[error("invalid option for {kind}: {reason}")]
    InvalidOption { kind: &'static str, reason: String },
}

/// Failures reading the base directory marker file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse marker file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize marker file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

impl SecretError {
    /// Not-found error that names close matches from `available`.
    pub fn not_found_with_suggestions(name: String, available: &[String]) -> Self {
        let lower = name.to_lowercase();
        let close: Vec<&str> = available
            .iter()
            .filter(|candidate| {
                let candidate = candidate.to_lowercase();
                candidate.contains(&lower) || lower.contains(&candidate)
            })
            .map(String::as_str)
            .collect();

        if close.is_empty() {
            Self::NotFound(name)
        } else {
            Self::NotFound(format!("{} (did you mean: {}?)", name, close.join(", ")))
        }
    }
}
