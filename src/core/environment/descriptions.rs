//! Description and group operations.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::SecretsEnvironment;
use crate::core::constants;
use crate::core::description::{
    read_group, validate_group_name, write_group, Attribute, Description, DescriptionIndex,
};
use crate::core::paths::validate_environment_name;
use crate::core::perms;
use crate::core::types::GroupName;
use crate::error::{DescriptionError, EnvironmentError, Result, SecretError};

/// Group files (`*.json`) in `dir` as `(group, path)`, sorted by group.
fn group_files(dir: &Path) -> Result<Vec<(GroupName, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            files.push((stem.to_string_lossy().to_string(), path));
        }
    }
    files.sort();
    Ok(files)
}

/// Read and validate one group file.
fn load_group(group: &str, path: &Path) -> Result<Vec<Description>> {
    validate_group_name(group)?;
    let descriptions = read_group(path, group)?;
    if descriptions.is_empty() {
        return Err(DescriptionError::EmptyGroup(group.to_string()).into());
    }
    Ok(descriptions)
}

impl SecretsEnvironment {
    /// Load every group file in `secrets.d/`.
    ///
    /// Either every group loads or the previous descriptions stay in place.
    ///
    /// # Errors
    ///
    /// Returns `DescriptionError` for a bad group name, an empty group, an
    /// unknown attribute or a variable described twice.
    pub fn read_descriptions(&mut self) -> Result<()> {
        if !self.exists(true) {
            return Err(EnvironmentError::NotFound(self.name.clone()).into());
        }

        let dir = self.descriptions_path();
        let mut groups = BTreeMap::new();
        if dir.is_dir() {
            for (group, path) in group_files(&dir)? {
                let descriptions = load_group(&group, &path)?;
                groups.insert(group, descriptions);
            }
        }
        let index = DescriptionIndex::build(&groups)?;

        debug!(environment = %self.name, groups = groups.len(), "read descriptions");
        self.descriptions = groups;
        self.index = index;
        Ok(())
    }

    /// Fail if any of `descriptions` names a variable that already has an
    /// entry in the value map.
    pub fn check_duplicates(&self, descriptions: &[Description]) -> Result<()> {
        match descriptions
            .iter()
            .find(|d| self.secrets.contains_key(&d.variable))
        {
            Some(duplicate) => Err(SecretError::Duplicate(duplicate.variable.clone()).into()),
            None => Ok(()),
        }
    }

    /// Copy group files from `source` into this environment's `secrets.d/`.
    ///
    /// `source` is a directory whose name ends in `.d`, a single `.json`
    /// group file, or the name of another environment in the same base
    /// directory. Descriptions are reloaded afterwards and new variables
    /// added with no value.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentError::InvalidSource` for anything else,
    /// `DescriptionError::GroupExists` if an incoming group is already
    /// present, `DescriptionError::DuplicateVariable` if the result would
    /// describe a variable twice, and `SecretError::Duplicate` if an
    /// incoming variable already has a value. Nothing is copied on error.
    pub fn clone_from(&mut self, source: &str) -> Result<()> {
        let source_path = Path::new(source);
        let files = if source_path.is_dir() {
            let name = source_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if !name.ends_with(".d") {
                return Err(EnvironmentError::InvalidSource(source.to_string()).into());
            }
            group_files(source_path)?
        } else if source_path.is_file() {
            let is_json = source_path.extension().and_then(|e| e.to_str()) == Some("json");
            let stem = source_path.file_stem().map(|s| s.to_string_lossy().to_string());
            match stem {
                Some(group) if is_json => vec![(group, source_path.to_path_buf())],
                _ => return Err(EnvironmentError::InvalidSource(source.to_string()).into()),
            }
        } else {
            validate_environment_name(source)?;
            let other = Self::at(source, &self.base_dir);
            let dir = other.descriptions_path();
            if source == self.name || !dir.is_dir() {
                return Err(EnvironmentError::InvalidSource(source.to_string()).into());
            }
            group_files(&dir)?
        };

        // Validate the merged result before anything is written.
        let dest = self.descriptions_path();
        let mut merged = BTreeMap::new();
        if dest.is_dir() {
            for (group, path) in group_files(&dest)? {
                let descriptions = load_group(&group, &path)?;
                merged.insert(group, descriptions);
            }
        }
        let mut incoming = Vec::with_capacity(files.len());
        for (group, path) in files {
            if merged.contains_key(&group) || self.group_path(&group).exists() {
                return Err(DescriptionError::GroupExists(group).into());
            }
            let descriptions = load_group(&group, &path)?;
            self.check_duplicates(&descriptions)?;
            merged.insert(group.clone(), descriptions);
            incoming.push((group, path));
        }
        DescriptionIndex::build(&merged)?;

        perms::create_private_dir(&dest, constants::PRIVATE_DIR_MODE)?;
        for (group, path) in &incoming {
            fs::copy(path, self.group_path(group))?;
        }
        perms::strip_other_permissions(&dest)?;
        info!(environment = %self.name, source, groups = incoming.len(), "cloned descriptions");

        self.read_descriptions()?;
        self.find_new_secrets();
        Ok(())
    }

    /// Loaded group names, sorted.
    pub fn groups(&self) -> Vec<&str> {
        self.descriptions.keys().map(String::as_str).collect()
    }

    /// Descriptions in `group`, in file order.
    pub fn group_descriptions(&self, group: &str) -> Result<&[Description]> {
        self.descriptions
            .get(group)
            .map(Vec::as_slice)
            .ok_or_else(|| DescriptionError::GroupNotFound(group.to_string()).into())
    }

    /// Variable names in `group`, in file order.
    pub fn items_in_group(&self, group: &str) -> Result<Vec<&str>> {
        Ok(self
            .group_descriptions(group)?
            .iter()
            .map(|d| d.variable.as_str())
            .collect())
    }

    pub fn is_item_in_group(&self, variable: &str, group: &str) -> bool {
        self.group_of(variable) == Some(group)
    }

    /// Group describing `variable`.
    pub fn group_of(&self, variable: &str) -> Option<&str> {
        self.index.get(variable, Attribute::Group)
    }

    /// Whether `variable` is described by any group.
    pub fn is_described(&self, variable: &str) -> bool {
        self.index.contains(variable)
    }

    /// Full description of `variable`.
    pub fn describe_variable(&self, variable: &str) -> Option<&Description> {
        let group = self.group_of(variable)?;
        self.descriptions
            .get(group)?
            .iter()
            .find(|d| d.variable == variable)
    }

    pub fn get_secret_type(&self, variable: &str) -> Option<&str> {
        self.index.get(variable, Attribute::Type)
    }

    pub fn get_prompt(&self, variable: &str) -> Option<&str> {
        self.index.get(variable, Attribute::Prompt)
    }

    pub fn get_options(&self, variable: &str) -> Option<&str> {
        self.index.get(variable, Attribute::Options)
    }

    pub fn get_help(&self, variable: &str) -> Option<&str> {
        self.index.get(variable, Attribute::Help)
    }

    pub fn get_export(&self, variable: &str) -> Option<&str> {
        self.index.get(variable, Attribute::Export)
    }

    pub fn get_group(&self, variable: &str) -> Option<&str> {
        self.group_of(variable)
    }

    /// Every description of every group, in group order.
    pub fn descriptions(&self) -> impl Iterator<Item = &Description> {
        self.descriptions.values().flatten()
    }

    /// Descriptions for a new group taken from `source`.
    ///
    /// `source` is a `.json` group file or the name of an environment that
    /// has a group called `group`.
    pub fn group_descriptions_from(&self, source: &str, group: &str) -> Result<Vec<Description>> {
        let source_path = Path::new(source);
        if source_path.is_file() {
            return load_group(group, source_path);
        }
        validate_environment_name(source)?;
        let other = Self::at(source, &self.base_dir);
        let path = other.group_path(group);
        if !path.is_file() {
            return Err(EnvironmentError::InvalidSource(source.to_string()).into());
        }
        load_group(group, &path)
    }

    /// Write a new group file and pick up its variables.
    ///
    /// # Errors
    ///
    /// Returns `DescriptionError::GroupExists` if the group file exists,
    /// `DescriptionError::DuplicateVariable` if another group already
    /// describes one of the variables, and `SecretError::Duplicate` if one
    /// already has a value.
    pub fn add_group(&mut self, group: &str, descriptions: Vec<Description>) -> Result<()> {
        validate_group_name(group)?;
        if descriptions.is_empty() {
            return Err(DescriptionError::EmptyGroup(group.to_string()).into());
        }
        let path = self.group_path(group);
        if path.exists() {
            return Err(DescriptionError::GroupExists(group.to_string()).into());
        }
        if let Some(described) = descriptions.iter().find(|d| self.is_described(&d.variable)) {
            return Err(DescriptionError::DuplicateVariable {
                variable: described.variable.clone(),
                first: self.group_of(&described.variable).unwrap_or_default().to_string(),
                second: group.to_string(),
            }
            .into());
        }
        self.check_duplicates(&descriptions)?;

        perms::create_private_dir(&self.descriptions_path(), constants::PRIVATE_DIR_MODE)?;
        write_group(&path, &descriptions)?;
        perms::strip_other_permissions(&path)?;
        info!(environment = %self.name, group, count = descriptions.len(), "added group");

        self.read_descriptions()?;
        self.find_new_secrets();
        Ok(())
    }

    /// Remove a group file and the values of its variables.
    ///
    /// Call [`write_secrets`](Self::write_secrets) to persist the removals.
    pub fn delete_group(&mut self, group: &str) -> Result<()> {
        validate_group_name(group)?;
        let path = self.group_path(group);
        if !path.is_file() {
            return Err(DescriptionError::GroupNotFound(group.to_string()).into());
        }
        let variables: Vec<String> = self
            .descriptions
            .get(group)
            .map(|d| d.iter().map(|d| d.variable.clone()).collect())
            .unwrap_or_default();

        fs::remove_file(&path)?;
        for variable in &variables {
            if self.secrets.remove(variable).is_some() {
                self.changed = true;
            }
        }
        info!(environment = %self.name, group, "deleted group");

        self.read_descriptions()
    }
}
