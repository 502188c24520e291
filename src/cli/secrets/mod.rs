//! Secret value commands.
//!
//! Implements show, get, set, unset and path; generation and descriptions
//! live in their own modules.

mod describe;
mod generate;

use serde_json::json;
use tracing::info;

use crate::cli::{output, require_force, Context};
use crate::core::environment::SecretsEnvironment;
use crate::error::{Error, Result, SecretError};

pub use describe::execute as describe;
pub use generate::execute as generate;

const REDACTED: &str = "REDACTED";

/// Split `VARIABLE=VALUE`.
fn parse_assignment(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(SecretError::InvalidAssignment(arg.to_string()).into()),
    }
}

/// Fail unless `name` has an entry in the value map.
fn ensure_known(env: &SecretsEnvironment, name: &str) -> Result<()> {
    if env.secrets().contains_key(name) {
        return Ok(());
    }
    let available: Vec<String> = env.secrets().keys().cloned().collect();
    Err(SecretError::not_found_with_suggestions(name.to_string(), &available).into())
}

/// Show variables with their types and values.
pub fn show(
    ctx: &Context,
    variables: &[String],
    group: Option<&str>,
    no_redact: bool,
    json_output: bool,
) -> Result<()> {
    let env = ctx.load()?;
    if let Some(group) = group {
        env.group_descriptions(group)?;
    }
    for variable in variables {
        ensure_known(&env, variable)?;
    }

    let selected: Vec<(&str, Option<&str>)> = env
        .items()
        .filter(|(name, _)| variables.is_empty() || variables.iter().any(|v| v == *name))
        .filter(|(name, _)| group.map_or(true, |g| env.is_item_in_group(name, g)))
        .collect();

    let shown = |value: Option<&str>| -> Option<String> {
        value.map(|v| {
            if no_redact {
                v.to_string()
            } else {
                REDACTED.to_string()
            }
        })
    };

    if json_output {
        let items: Vec<_> = selected
            .iter()
            .map(|(name, value)| {
                json!({
                    "Variable": name,
                    "Type": env.get_secret_type(name),
                    "Value": shown(*value),
                    "Export": env.get_export(name),
                })
            })
            .collect();
        return output::json(&items);
    }

    if selected.is_empty() {
        output::dimmed("no secrets found");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = selected
        .iter()
        .map(|(name, value)| {
            vec![
                name.to_string(),
                env.get_secret_type(name).unwrap_or_default().to_string(),
                shown(*value).unwrap_or_default(),
                env.get_export(name).unwrap_or_default().to_string(),
            ]
        })
        .collect();
    output::table(&["VARIABLE", "TYPE", "VALUE", "EXPORT"], &rows);
    Ok(())
}

/// Print one value, undecorated for scripting.
pub fn get(ctx: &Context, variable: &str) -> Result<()> {
    let env = ctx.load()?;
    if let Some(value) = env.get_secret(variable, false)? {
        output::data(value);
    }
    Ok(())
}

/// Set values from `VARIABLE=VALUE` assignments.
///
/// `VARIABLE=@OTHER` copies the current value of `OTHER`.
pub fn set(ctx: &Context, assignments: &[String]) -> Result<()> {
    let mut env = ctx.load()?;

    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        if !env.is_described(name) {
            return Err(SecretError::Undescribed(name.to_string()).into());
        }

        let value = match value.strip_prefix('@') {
            Some(other) if !other.is_empty() => env
                .get_secret(other, false)?
                .unwrap_or_default()
                .to_string(),
            _ => value.to_string(),
        };

        if let Some(allowed) = env.describe_variable(name).and_then(|d| d.allowed_values()) {
            if !allowed.contains(&value.as_str()) {
                return Err(Error::Other(format!(
                    "'{}' is not an allowed value for {} (choose from: {})",
                    value,
                    name,
                    allowed.join(", ")
                )));
            }
        }

        env.set_secret(name, value)?;
        info!("Set secret: {}", name);
        output::success(&format!("set {}", output::key(name)));
    }

    env.write_secrets()?;
    Ok(())
}

/// Remove values.
pub fn unset(ctx: &Context, variables: &[String], force: bool) -> Result<()> {
    require_force(force, "unset secrets")?;
    let mut env = ctx.load()?;

    for variable in variables {
        ensure_known(&env, variable)?;
        env.delete_secret(variable);
        output::success(&format!("unset {}", output::key(variable)));
    }

    env.write_secrets()?;
    Ok(())
}

/// Print the secrets file path.
pub fn path(ctx: &Context) -> Result<()> {
    let env = ctx.environment(None)?;
    output::data(env.secrets_file_path().display());
    Ok(())
}
