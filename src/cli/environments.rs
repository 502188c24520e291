//! Environment commands.

use serde_json::json;
use tracing::info;

use crate::cli::{output, require_force, Context};
use crate::core::environment::list_environments;
use crate::core::paths;
use crate::error::{EnvironmentError, Result};

/// Create each named environment (or the current one).
pub fn create(ctx: &Context, names: &[String], clone_from: Option<&str>, alias: bool) -> Result<()> {
    let names: Vec<Option<&str>> = if names.is_empty() {
        vec![None]
    } else {
        names.iter().map(|n| Some(n.as_str())).collect()
    };

    for name in names {
        let mut env = ctx.environment(name)?;
        env.create(clone_from, alias)?;
        if alias {
            output::success(&format!(
                "created {} (alias for {})",
                output::key(env.name()),
                output::key(clone_from.unwrap_or_default())
            ));
            continue;
        }
        env.write_secrets()?;
        output::success(&format!(
            "created {} at {}",
            output::key(env.name()),
            output::path(env.environment_path().display())
        ));
    }
    Ok(())
}

/// List environments in the base directory.
pub fn list(ctx: &Context, json_output: bool) -> Result<()> {
    let base_dir = ctx.base_dir()?;
    let environments = list_environments(&base_dir)?;

    if json_output {
        let items: Vec<_> = environments
            .iter()
            .map(|e| json!({ "name": e.name, "alias_for": e.alias_for }))
            .collect();
        return output::json(&items);
    }

    if environments.is_empty() {
        output::dimmed("no environments found");
        output::hint("run: psec environments create NAME");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = environments
        .into_iter()
        .map(|e| vec![e.name, e.alias_for.unwrap_or_default()])
        .collect();
    output::table(&["ENVIRONMENT", "ALIAS FOR"], &rows);
    Ok(())
}

/// Delete an environment.
pub fn delete(ctx: &Context, name: &str, force: bool) -> Result<()> {
    require_force(force, &format!("delete environment '{}'", name))?;
    let env = ctx.environment(Some(name))?;
    env.delete()?;
    info!("Deleted environment: {}", name);
    output::success(&format!("deleted {}", output::key(name)));
    Ok(())
}

/// Show, save or clear the default environment for the current directory.
pub fn default(ctx: &Context, name: Option<&str>, unset: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;

    if unset {
        if paths::clear_default_environment(&cwd)? {
            output::success("default environment cleared");
        } else {
            output::dimmed("no default environment saved here");
        }
        return Ok(());
    }

    match name {
        Some(name) => {
            let env = ctx.environment(Some(name))?;
            if !env.exists(true) {
                return Err(EnvironmentError::NotFound(name.to_string()).into());
            }
            let path = paths::set_default_environment(&cwd, name)?;
            output::success(&format!(
                "default environment {} saved in {}",
                output::key(name),
                output::path(path.display())
            ));
        }
        None => {
            let name = paths::default_environment(ctx.environment.as_deref())?;
            output::data(name);
        }
    }
    Ok(())
}

/// Print an environment's directory, or its scratch directory.
pub fn path(ctx: &Context, name: Option<&str>, tmpdir: bool) -> Result<()> {
    let env = ctx.environment(name)?;
    let path = if tmpdir {
        env.tmpdir_path()?
    } else {
        env.environment_path()
    };
    output::data(path.display());
    Ok(())
}
