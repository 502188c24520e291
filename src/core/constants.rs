//! Constants used throughout psec.
//!
//! Centralizes file names, environment variable names and permission modes.

/// Secret values file at the root of each environment.
pub const SECRETS_FILE: &str = "secrets.json";

/// Old YAML secrets file. Its presence blocks loading.
pub const LEGACY_SECRETS_FILE: &str = "secrets.yml";

/// Directory of group description files inside an environment.
pub const DESCRIPTIONS_DIR: &str = "secrets.d";

/// Scratch directory inside an environment.
pub const TMP_DIR: &str = "tmp";

/// Marker file identifying an initialized base directory.
pub const BASEDIR_MARKER: &str = ".psec.toml";

/// Per-directory default environment file (in the current directory).
pub const ENVIRONMENT_MARKER: &str = ".psec-environment";

/// Alias indirection file, used where symbolic links are unavailable.
#[cfg(not(unix))]
pub const ALIAS_FILE: &str = ".alias";

/// Environment variable naming the default environment.
pub const ENVIRONMENT_VAR: &str = "D2_ENVIRONMENT";

/// Environment variable overriding the base directory.
pub const BASEDIR_VAR: &str = "D2_SECRETS_BASEDIR";

/// Environment variable overriding the base directory name under home.
pub const BASENAME_VAR: &str = "D2_SECRETS_BASENAME";

/// Base directory name under the home directory.
#[cfg(not(windows))]
pub const DEFAULT_BASENAME: &str = ".secrets";

/// Base directory name under the home directory.
#[cfg(windows)]
pub const DEFAULT_BASENAME: &str = "secrets";

/// Mode for directories psec creates.
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Mode for files psec creates.
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// The "other" permission triad (read, write, execute).
pub const OTHER_PERMISSION_BITS: u32 = 0o007;
