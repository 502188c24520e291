//! Secret value operations.
//!
//! Reads and writes `secrets.json` and keeps the in-memory map in step with
//! the descriptions.

use std::collections::BTreeMap;
use std::fs;

use serde_json::Value;
use tracing::{debug, info};

use super::SecretsEnvironment;
use crate::core::description::Attribute;
use crate::core::perms;
use crate::core::types::SecretValues;
use crate::error::{EnvironmentError, Result, SecretError};

impl SecretsEnvironment {
    /// Load values from `secrets.json`.
    ///
    /// With `from_descriptions` the descriptions are (re)loaded first and
    /// every described variable missing from the file is added with no
    /// value. A missing values file is an empty map, and with
    /// `from_descriptions` leaves the environment changed.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentError::LegacyFormat` if an old `secrets.yml` is
    /// present and `EnvironmentError::NotFound` if the environment is missing.
    pub fn read_secrets(&mut self, from_descriptions: bool) -> Result<()> {
        let legacy = self.legacy_secrets_file_path();
        if legacy.exists() {
            return Err(EnvironmentError::LegacyFormat(legacy).into());
        }
        if !self.exists(true) {
            return Err(EnvironmentError::NotFound(self.name.clone()).into());
        }

        if from_descriptions {
            self.read_descriptions()?;
        }

        let path = self.secrets_file_path();
        let missing = !path.is_file();
        self.secrets = if !missing {
            let contents = fs::read_to_string(&path)?;
            let raw: BTreeMap<String, Value> = serde_json::from_str(&contents)?;
            raw.into_iter()
                .map(|(name, value)| {
                    let value = match value {
                        Value::Null => None,
                        Value::String(s) => Some(s),
                        other => Some(other.to_string()),
                    };
                    (name, value)
                })
                .collect()
        } else {
            SecretValues::new()
        };
        // A first write creates the file.
        self.changed = missing && from_descriptions;
        debug!(environment = %self.name, count = self.secrets.len(), "read secrets");

        if from_descriptions {
            self.find_new_secrets();
        }
        Ok(())
    }

    /// Load descriptions and then values.
    pub fn read_secrets_and_descriptions(&mut self) -> Result<()> {
        self.read_secrets(true)
    }

    /// Add an empty entry for every described variable without one.
    ///
    /// Marks the environment changed when anything is added.
    pub fn find_new_secrets(&mut self) {
        for descriptions in self.descriptions.values() {
            for description in descriptions {
                if !self.secrets.contains_key(&description.variable) {
                    debug!(variable = %description.variable, "found new secret");
                    self.secrets.insert(description.variable.clone(), None);
                    self.changed = true;
                }
            }
        }
    }

    /// Value of `name`.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if the variable is unknown, or known
    /// but unset while `allow_none` is false.
    pub fn get_secret(&self, name: &str, allow_none: bool) -> Result<Option<&str>> {
        match self.secrets.get(name) {
            Some(Some(value)) => Ok(Some(value.as_str())),
            Some(None) if allow_none => Ok(None),
            Some(None) => Err(SecretError::NotFound(name.to_string()).into()),
            None => {
                let available: Vec<String> = self.secrets.keys().cloned().collect();
                Err(SecretError::not_found_with_suggestions(name.to_string(), &available).into())
            }
        }
    }

    /// Process environment names `name` is exported as.
    ///
    /// Always the variable name itself, plus the `Export` alias (or the name)
    /// under the configured prefix when that differs.
    fn export_names(&self, name: &str) -> Vec<String> {
        let exported = self
            .index
            .get(name, Attribute::Export)
            .unwrap_or(name)
            .to_string();
        let exported = match &self.env_var_prefix {
            Some(prefix) => format!("{}{}", prefix, exported),
            None => exported,
        };

        let mut names = vec![name.to_string()];
        if exported != name {
            names.push(exported);
        }
        names
    }

    /// Set `name` to `value` in memory and mark the environment changed.
    ///
    /// When exporting is on, the value is also placed in the process
    /// environment under its own name and its export name.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::EnvVarExists` when `preserve_existing` is on and
    /// any target process variable is already set. Nothing changes then.
    pub fn set_secret(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();

        if self.export_env_vars {
            let names = self.export_names(name);
            if self.preserve_existing {
                if let Some(taken) = names.iter().find(|n| std::env::var_os(n).is_some()) {
                    return Err(SecretError::EnvVarExists(taken.clone()).into());
                }
            }
            for exported in &names {
                std::env::set_var(exported, &value);
            }
        }

        self.secrets.insert(name.to_string(), Some(value));
        self.changed = true;
        debug!(variable = name, "set secret");
        Ok(())
    }

    /// Remove `name` from the value map and, when exporting, from the
    /// process environment. Absent names are ignored, but the environment
    /// is still marked changed.
    pub fn delete_secret(&mut self, name: &str) {
        if self.secrets.remove(name).is_some() && self.export_env_vars {
            for exported in self.export_names(name) {
                std::env::remove_var(exported);
            }
        }
        self.changed = true;
        debug!(variable = name, "deleted secret");
    }

    /// Whether in-memory values differ from what was last read or written.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Persist values to `secrets.json` if anything changed.
    ///
    /// Returns whether the file was written.
    pub fn write_secrets(&mut self) -> Result<bool> {
        if !self.changed {
            debug!(environment = %self.name, "no changes to write");
            return Ok(false);
        }
        if !self.environment_path().is_dir() {
            return Err(EnvironmentError::NotFound(self.name.clone()).into());
        }

        let path = self.secrets_file_path();
        let mut contents = serde_json::to_string_pretty(&self.secrets)?;
        contents.push('\n');
        fs::write(&path, contents)?;
        perms::strip_other_permissions(&path)?;

        self.changed = false;
        info!(environment = %self.name, count = self.secrets.len(), "wrote secrets");
        Ok(true)
    }

    /// The live value map.
    pub fn secrets(&self) -> &SecretValues {
        &self.secrets
    }

    /// `(name, value)` pairs in name order, unset values included.
    pub fn items(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.secrets
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Set values as `(process variable, value)` pairs for child processes.
    ///
    /// Each variable appears under its own name and its export name.
    pub fn exported_variables(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.secrets {
            if let Some(value) = value {
                for exported in self.export_names(name) {
                    pairs.push((exported, value.clone()));
                }
            }
        }
        pairs
    }
}
