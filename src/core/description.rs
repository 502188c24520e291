//! Variable descriptions and group file I/O.
//!
//! A group file (`secrets.d/<group>.json`) is a JSON array of objects whose
//! keys are limited to [`Attribute`]. The group name is the file's base name
//! and never comes from the file contents.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::core::types::{GroupName, VariableName};
use crate::error::{DescriptionError, Result};

/// The attribute keys allowed in a group file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Variable,
    Group,
    Help,
    Type,
    Export,
    Prompt,
    Options,
}

impl Attribute {
    /// Every allowed attribute, in file order.
    pub const ALL: [Attribute; 7] = [
        Attribute::Variable,
        Attribute::Group,
        Attribute::Help,
        Attribute::Type,
        Attribute::Export,
        Attribute::Prompt,
        Attribute::Options,
    ];

    /// Parse a JSON key. Anything outside the allowed set is `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Variable" => Some(Self::Variable),
            "Group" => Some(Self::Group),
            "Help" => Some(Self::Help),
            "Type" => Some(Self::Type),
            "Export" => Some(Self::Export),
            "Prompt" => Some(Self::Prompt),
            "Options" => Some(Self::Options),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Variable => "Variable",
            Self::Group => "Group",
            Self::Help => "Help",
            Self::Type => "Type",
            Self::Export => "Export",
            Self::Prompt => "Prompt",
            Self::Options => "Options",
        }
    }
}

/// One variable's description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Description {
    pub variable: VariableName,
    #[serde(rename = "Type")]
    pub kind: String,
    /// Group the description was loaded from. Never written back.
    #[serde(skip)]
    pub group: Option<GroupName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,
    /// Comma separated allowed values, or `*` for free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Description {
    pub fn new(variable: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_export(mut self, export: impl Into<String>) -> Self {
        self.export = Some(export.into());
        self
    }

    /// Allowed values when `Options` lists them, `None` for free text.
    ///
    /// A `*` anywhere in the list allows free text; the other entries are
    /// then only suggestions.
    pub fn allowed_values(&self) -> Option<Vec<&str>> {
        let options: Vec<&str> = self
            .options
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect();
        if options.is_empty() || options.contains(&"*") {
            return None;
        }
        Some(options)
    }

    /// Build from one JSON object, rejecting unknown keys.
    fn from_object(group: &str, object: &serde_json::Map<String, Value>) -> Result<Self> {
        let mut description = Description {
            group: Some(group.to_string()),
            ..Description::default()
        };
        let mut variable = None;
        let mut kind = None;

        for (key, value) in object {
            let attribute =
                Attribute::from_key(key).ok_or_else(|| DescriptionError::InvalidAttribute {
                    group: group.to_string(),
                    attribute: key.clone(),
                })?;
            let text = value_to_string(value);
            match attribute {
                Attribute::Variable => variable = text,
                Attribute::Type => kind = text,
                // Derived from the file name.
                Attribute::Group => {}
                Attribute::Help => description.help = text,
                Attribute::Export => description.export = text,
                Attribute::Prompt => description.prompt = text,
                Attribute::Options => description.options = text,
            }
        }

        description.variable = variable
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DescriptionError::MissingField {
                group: group.to_string(),
                field: "Variable",
            })?;
        description.kind = kind
            .filter(|k| !k.is_empty())
            .ok_or_else(|| DescriptionError::MissingField {
                group: group.to_string(),
                field: "Type",
            })?;

        Ok(description)
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Validate a group name: non-empty, no `.`, no path separators.
pub fn validate_group_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name.contains('.')
        || name.contains('/')
        || name.contains(std::path::MAIN_SEPARATOR)
    {
        return Err(DescriptionError::InvalidGroupName(name.to_string()).into());
    }
    Ok(())
}

/// Read one group file.
///
/// # Errors
///
/// Returns `DescriptionError` if the file isn't a JSON array of objects,
/// uses a key outside [`Attribute`], or lacks `Variable`/`Type`.
pub fn read_group(path: &Path, group: &str) -> Result<Vec<Description>> {
    debug!(path = %path.display(), group, "reading group");
    let contents = fs::read_to_string(path)?;
    let parsed: Vec<serde_json::Map<String, Value>> =
        serde_json::from_str(&contents).map_err(|source| DescriptionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    parsed
        .iter()
        .map(|object| Description::from_object(group, object))
        .collect()
}

/// Write one group file as an indented JSON array.
pub fn write_group(path: &Path, descriptions: &[Description]) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(descriptions)?;
    contents.push('\n');
    fs::write(path, contents)?;
    debug!(path = %path.display(), count = descriptions.len(), "wrote group");
    Ok(())
}

/// Per-attribute lookup tables built from every loaded group.
#[derive(Debug, Default, Clone)]
pub struct DescriptionIndex {
    pub types: HashMap<VariableName, String>,
    pub groups: HashMap<VariableName, GroupName>,
    pub prompts: HashMap<VariableName, String>,
    pub exports: HashMap<VariableName, String>,
    pub options: HashMap<VariableName, String>,
    pub help: HashMap<VariableName, String>,
}

impl DescriptionIndex {
    /// Index every description of every group.
    ///
    /// # Errors
    ///
    /// Returns `DescriptionError::DuplicateVariable` if two groups describe
    /// the same variable.
    pub fn build(groups: &BTreeMap<GroupName, Vec<Description>>) -> Result<Self> {
        let mut index = Self::default();
        for (group, descriptions) in groups {
            for description in descriptions {
                index.insert(group, description)?;
            }
        }
        Ok(index)
    }

    fn insert(&mut self, group: &str, description: &Description) -> Result<()> {
        let variable = &description.variable;
        if let Some(first) = self.groups.get(variable) {
            return Err(DescriptionError::DuplicateVariable {
                variable: variable.clone(),
                first: first.clone(),
                second: group.to_string(),
            }
            .into());
        }
        self.groups.insert(variable.clone(), group.to_string());
        self.types.insert(variable.clone(), description.kind.clone());
        for (table, value) in [
            (&mut self.prompts, &description.prompt),
            (&mut self.exports, &description.export),
            (&mut self.options, &description.options),
            (&mut self.help, &description.help),
        ] {
            if let Some(value) = value {
                table.insert(variable.clone(), value.clone());
            }
        }
        Ok(())
    }

    /// Whether `variable` is described.
    pub fn contains(&self, variable: &str) -> bool {
        self.groups.contains_key(variable)
    }

    /// Look up one attribute of `variable`.
    pub fn get(&self, variable: &str, attribute: Attribute) -> Option<&str> {
        let table = match attribute {
            Attribute::Variable => {
                return self.groups.get_key_value(variable).map(|(k, _)| k.as_str())
            }
            Attribute::Group => &self.groups,
            Attribute::Type => &self.types,
            Attribute::Prompt => &self.prompts,
            Attribute::Export => &self.exports,
            Attribute::Options => &self.options,
            Attribute::Help => &self.help,
        };
        table.get(variable).map(String::as_str)
    }
}
