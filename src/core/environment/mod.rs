//! The primary interface for psec operations.
//!
//! [`SecretsEnvironment`] owns one environment's on-disk layout and its
//! in-memory working copy of values and descriptions:
//!
//! ```text
//! <base_dir>/
//!   <environment>/
//!     secrets.json          # {"var": "value" | null, ...}
//!     secrets.d/
//!       <group>.json        # [{"Variable": .., "Type": .., ...}, ...]
//!     tmp/                  # scratch, created on demand
//! ```
//!
//! There is no locking: two processes writing the same environment race
//! and the last writer wins.

mod descriptions;
mod secrets;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::constants;
use crate::core::description::{Description, DescriptionIndex};
use crate::core::paths;
use crate::core::perms;
use crate::core::types::{EnvironmentName, GroupName, SecretValues};
use crate::error::{EnvironmentError, Result};

/// How to construct a [`SecretsEnvironment`].
#[derive(Debug, Clone, Default)]
pub struct EnvironmentOptions {
    /// Environment name; resolved with [`paths::default_environment`] when `None`.
    pub environment: Option<String>,
    /// Base directory; resolved with [`paths::default_base_dir`] when `None`.
    pub base_dir: Option<PathBuf>,
    /// Initialize the base directory if it's missing or unmarked.
    pub create_root: bool,
    /// Mirror every `set_secret` into the process environment.
    pub export_env_vars: bool,
    /// Refuse to overwrite process environment variables that already exist.
    pub preserve_existing: bool,
    /// Prefix for exported variable names.
    pub env_var_prefix: Option<String>,
    /// Default clone source for [`SecretsEnvironment::create`].
    pub source: Option<String>,
}

impl EnvironmentOptions {
    /// Options for an explicit environment in an explicit base directory.
    pub fn new(environment: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            environment: Some(environment.into()),
            base_dir: Some(base_dir.into()),
            ..Self::default()
        }
    }
}

/// One environment of secrets.
pub struct SecretsEnvironment {
    pub(super) name: EnvironmentName,
    pub(super) base_dir: PathBuf,
    pub(super) export_env_vars: bool,
    pub(super) preserve_existing: bool,
    pub(super) env_var_prefix: Option<String>,
    pub(super) source: Option<String>,
    pub(super) secrets: SecretValues,
    pub(super) descriptions: BTreeMap<GroupName, Vec<Description>>,
    pub(super) index: DescriptionIndex,
    pub(super) changed: bool,
}

impl std::fmt::Debug for SecretsEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsEnvironment")
            .field("name", &self.name)
            .field("base_dir", &self.base_dir)
            .field("groups", &self.descriptions.keys().collect::<Vec<_>>())
            .field("secrets", &self.secrets.len())
            .field("changed", &self.changed)
            .finish()
    }
}

/// An environment found under a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub name: EnvironmentName,
    /// Target environment when this entry is an alias.
    pub alias_for: Option<EnvironmentName>,
}

impl SecretsEnvironment {
    /// Resolve the name and base directory and validate the base directory.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentError::InvalidName` for a name that isn't a single
    /// path component, and `EnvironmentError::BasedirNotFound` (or
    /// `InvalidBasedir`) when the base directory is missing (or unmarked)
    /// and `create_root` is off.
    pub fn new(options: EnvironmentOptions) -> Result<Self> {
        let base_dir = match options.base_dir {
            Some(dir) => dir,
            None => paths::default_base_dir()?,
        };
        let name = paths::default_environment(options.environment.as_deref())?;
        paths::validate_environment_name(&name)?;

        if !paths::is_valid_base_dir(&base_dir) {
            if options.create_root {
                paths::init_base_dir(&base_dir)?;
            } else if !base_dir.exists() {
                return Err(EnvironmentError::BasedirNotFound(base_dir).into());
            } else {
                return Err(EnvironmentError::InvalidBasedir(base_dir).into());
            }
        }

        debug!(environment = %name, base_dir = %base_dir.display(), "opened environment");

        let mut env = Self::at(&name, &base_dir);
        env.export_env_vars = options.export_env_vars;
        env.preserve_existing = options.preserve_existing;
        env.env_var_prefix = options.env_var_prefix;
        env.source = options.source;
        Ok(env)
    }

    /// Open `name` in an existing, initialized `base_dir`.
    pub fn open(name: &str, base_dir: &Path) -> Result<Self> {
        Self::new(EnvironmentOptions::new(name, base_dir))
    }

    /// Handle on `name` without validating anything. Callers validate the
    /// name with [`paths::validate_environment_name`] first.
    pub(crate) fn at(name: &str, base_dir: &Path) -> Self {
        Self {
            name: name.to_string(),
            base_dir: base_dir.to_path_buf(),
            export_env_vars: false,
            preserve_existing: false,
            env_var_prefix: None,
            source: None,
            secrets: SecretValues::new(),
            descriptions: BTreeMap::new(),
            index: DescriptionIndex::default(),
            changed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Default clone source given at construction.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Directory entry for this environment, before alias resolution.
    fn entry_path(&self) -> PathBuf {
        self.base_dir.join(&self.name)
    }

    /// Root directory of this environment.
    ///
    /// Aliases resolve to their target's directory.
    pub fn environment_path(&self) -> PathBuf {
        let path = self.entry_path();
        #[cfg(not(unix))]
        {
            if let Some(target) = read_alias_file(&path) {
                return self.base_dir.join(target);
            }
        }
        path
    }

    pub fn secrets_file_path(&self) -> PathBuf {
        self.environment_path().join(constants::SECRETS_FILE)
    }

    pub fn legacy_secrets_file_path(&self) -> PathBuf {
        self.environment_path().join(constants::LEGACY_SECRETS_FILE)
    }

    pub fn descriptions_path(&self) -> PathBuf {
        self.environment_path().join(constants::DESCRIPTIONS_DIR)
    }

    pub fn group_path(&self, group: &str) -> PathBuf {
        self.descriptions_path().join(format!("{}.json", group))
    }

    /// Scratch directory, created with mode 0700 if needed.
    pub fn tmpdir_path(&self) -> Result<PathBuf> {
        if !self.exists(true) {
            return Err(EnvironmentError::NotFound(self.name.clone()).into());
        }
        let path = self.environment_path().join(constants::TMP_DIR);
        perms::create_private_dir(&path, constants::PRIVATE_DIR_MODE)?;
        Ok(path)
    }

    /// Whether this environment is an alias for another one.
    pub fn is_alias(&self) -> bool {
        self.alias_target().is_some()
    }

    /// Name of the aliased environment, if this is an alias.
    pub fn alias_target(&self) -> Option<String> {
        alias_target(&self.entry_path())
    }

    /// Whether the environment exists.
    ///
    /// True if the descriptions directory exists. Otherwise with
    /// `path_only` the environment directory merely has to exist; without
    /// it the environment tree must hold at least one file.
    pub fn exists(&self, path_only: bool) -> bool {
        if self.descriptions_path().is_dir() {
            return true;
        }
        let path = self.environment_path();
        if path_only {
            return path.exists();
        }
        path.is_dir()
            && WalkDir::new(&path)
                .into_iter()
                .filter_map(|e| e.ok())
                .any(|e| e.file_type().is_file())
    }

    /// Create the environment.
    ///
    /// `source` (or the construction-time source) is cloned into the new
    /// descriptions directory. With `as_alias` the environment becomes an
    /// alias of the environment named by the source instead.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentError::AlreadyExists` if it exists,
    /// `EnvironmentError::AliasWithoutSource` for an alias without a source,
    /// and clone errors from [`SecretsEnvironment::clone_from`].
    pub fn create(&mut self, source: Option<&str>, as_alias: bool) -> Result<()> {
        if self.exists(false) {
            return Err(EnvironmentError::AlreadyExists(self.name.clone()).into());
        }
        let source = source.map(str::to_string).or_else(|| self.source.clone());

        if as_alias {
            let target = source.ok_or(EnvironmentError::AliasWithoutSource)?;
            paths::validate_environment_name(&target)?;
            if !Self::at(&target, &self.base_dir).exists(false) {
                return Err(EnvironmentError::NotFound(target).into());
            }
            create_alias(&self.base_dir, &self.name, &target)?;
            info!(environment = %self.name, target = %target, "created alias");
            return Ok(());
        }

        perms::create_private_dir(&self.environment_path(), constants::PRIVATE_DIR_MODE)?;
        perms::create_private_dir(&self.descriptions_path(), constants::PRIVATE_DIR_MODE)?;
        info!(environment = %self.name, "created environment");

        if let Some(source) = source {
            self.clone_from(&source)?;
        }
        Ok(())
    }

    /// Remove the environment. An alias loses only its link.
    pub fn delete(&self) -> Result<()> {
        let entry = self.entry_path();
        let is_link = fs::symlink_metadata(&entry)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        if is_link {
            fs::remove_file(&entry)?;
        } else if entry.is_dir() {
            fs::remove_dir_all(&entry)?;
        } else {
            return Err(EnvironmentError::NotFound(self.name.clone()).into());
        }
        info!(environment = %self.name, "deleted environment");
        Ok(())
    }
}

#[cfg(unix)]
fn create_alias(base_dir: &Path, name: &str, target: &str) -> Result<()> {
    std::os::unix::fs::symlink(target, base_dir.join(name))?;
    Ok(())
}

#[cfg(not(unix))]
fn create_alias(base_dir: &Path, name: &str, target: &str) -> Result<()> {
    let path = base_dir.join(name);
    fs::create_dir_all(&path)?;
    fs::write(path.join(constants::ALIAS_FILE), format!("{}\n", target))?;
    Ok(())
}

#[cfg(not(unix))]
fn read_alias_file(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path.join(constants::ALIAS_FILE)).ok()?;
    let target = contents.trim();
    (!target.is_empty()).then(|| target.to_string())
}

#[cfg(unix)]
fn alias_target(entry: &Path) -> Option<String> {
    let metadata = fs::symlink_metadata(entry).ok()?;
    if !metadata.file_type().is_symlink() {
        return None;
    }
    let target = fs::read_link(entry).ok()?;
    target.file_name().map(|n| n.to_string_lossy().to_string())
}

#[cfg(not(unix))]
fn alias_target(entry: &Path) -> Option<String> {
    read_alias_file(entry)
}

/// Every environment under `base_dir`, sorted by name.
///
/// Hidden entries (such as the marker file) are skipped.
pub fn list_environments(base_dir: &Path) -> Result<Vec<EnvironmentInfo>> {
    paths::ensure_valid_base_dir(base_dir)?;

    let mut environments = Vec::new();
    for entry in fs::read_dir(base_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let alias_for = alias_target(&path);
        if alias_for.is_some() || path.is_dir() {
            environments.push(EnvironmentInfo { name, alias_for });
        }
    }
    environments.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(environments)
}
