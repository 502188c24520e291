//! Default environment and base directory resolution.
//!
//! Resolution order for the environment name:
//!
//! 1. an explicit override (`--environment`)
//! 2. the `D2_ENVIRONMENT` environment variable
//! 3. the `.psec-environment` file in the current directory
//! 4. the base name of the current directory
//!
//! The first non-empty source wins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::perms;
use crate::error::{EnvironmentError, Result};

/// Pick the environment name from already-gathered sources.
///
/// Pure so it can be tested without touching the process environment.
pub fn resolve_environment(
    explicit: Option<&str>,
    from_env_var: Option<&str>,
    from_marker: Option<&str>,
    cwd: Option<&Path>,
) -> Option<String> {
    fn non_empty(s: Option<&str>) -> Option<String> {
        s.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    non_empty(explicit)
        .or_else(|| non_empty(from_env_var))
        .or_else(|| non_empty(from_marker))
        .or_else(|| {
            cwd.and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .filter(|n| !n.is_empty())
        })
}

/// Default environment name for this process.
///
/// # Errors
///
/// Returns `EnvironmentError::NoName` if no source yields a name.
pub fn default_environment(explicit: Option<&str>) -> Result<String> {
    let from_env_var = std::env::var(constants::ENVIRONMENT_VAR).ok();
    let cwd = std::env::current_dir().ok();
    let from_marker = cwd.as_deref().and_then(saved_default_environment);

    let name = resolve_environment(
        explicit,
        from_env_var.as_deref(),
        from_marker.as_deref(),
        cwd.as_deref(),
    )
    .ok_or(EnvironmentError::NoName)?;

    debug!(environment = %name, "resolved environment");
    Ok(name)
}

/// Validate an environment name: a single path component that isn't hidden.
///
/// # Errors
///
/// Returns `EnvironmentError::InvalidName` for empty names, names starting
/// with `.` (including `.` and `..`), and names with separators or a root.
pub fn validate_environment_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if !single || name.starts_with('.') || name.contains('/') || name.contains('\\') {
        return Err(EnvironmentError::InvalidName(name.to_string()).into());
    }
    Ok(())
}

/// Pick the base directory from already-gathered sources.
pub fn resolve_base_dir(
    from_env_var: Option<&str>,
    basename: Option<&str>,
    home: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(dir) = from_env_var.filter(|d| !d.trim().is_empty()) {
        return Some(PathBuf::from(dir));
    }
    let basename = basename
        .filter(|b| !b.trim().is_empty())
        .unwrap_or(constants::DEFAULT_BASENAME);
    home.map(|h| h.join(basename))
}

/// Default base directory: `D2_SECRETS_BASEDIR`, else `~/.secrets`.
///
/// # Errors
///
/// Returns an error if no override is set and the home directory is unknown.
pub fn default_base_dir() -> Result<PathBuf> {
    let from_env_var = std::env::var(constants::BASEDIR_VAR).ok();
    let basename = std::env::var(constants::BASENAME_VAR).ok();
    let home = dirs::home_dir();

    resolve_base_dir(from_env_var.as_deref(), basename.as_deref(), home.as_deref()).ok_or_else(
        || crate::error::Error::Other("unable to determine home directory".to_string()),
    )
}

/// Whether `path` exists and carries a valid marker file.
pub fn is_valid_base_dir(path: &Path) -> bool {
    path.is_dir() && Config::exists(path) && Config::load(path).is_ok()
}

/// Require `path` to be an initialized base directory.
///
/// # Errors
///
/// Returns `EnvironmentError::BasedirNotFound` if it doesn't exist and
/// `EnvironmentError::InvalidBasedir` if it isn't marked.
pub fn ensure_valid_base_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(EnvironmentError::BasedirNotFound(path.to_path_buf()).into());
    }
    if !is_valid_base_dir(path) {
        return Err(EnvironmentError::InvalidBasedir(path.to_path_buf()).into());
    }
    Ok(())
}

/// Create `path` (if needed) and write the marker file.
///
/// Idempotent: an already valid base directory is left untouched.
pub fn init_base_dir(path: &Path) -> Result<()> {
    if is_valid_base_dir(path) {
        debug!(path = %path.display(), "base directory already initialized");
        return Ok(());
    }
    perms::create_private_dir(path, constants::PRIVATE_DIR_MODE)?;
    Config::new().save(path)?;
    debug!(path = %path.display(), "initialized base directory");
    Ok(())
}

/// Default environment saved in `dir`, if any.
pub fn saved_default_environment(dir: &Path) -> Option<String> {
    let contents = fs::read_to_string(dir.join(constants::ENVIRONMENT_MARKER)).ok()?;
    contents
        .lines()
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Save `name` as the default environment for `dir`.
pub fn set_default_environment(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(constants::ENVIRONMENT_MARKER);
    fs::write(&path, format!("{}\n", name))?;
    debug!(path = %path.display(), environment = %name, "saved default environment");
    Ok(path)
}

/// Remove the saved default environment for `dir`. Returns whether one existed.
pub fn clear_default_environment(dir: &Path) -> Result<bool> {
    let path = dir.join(constants::ENVIRONMENT_MARKER);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(&path)?;
    Ok(true)
}
