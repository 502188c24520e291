//! Group commands.

use serde_json::json;
use tracing::info;

use crate::cli::{output, require_force, Context};
use crate::error::Result;

/// List groups with their variable counts.
pub fn list(ctx: &Context, json_output: bool) -> Result<()> {
    let env = ctx.load()?;
    let counts: Vec<(&str, usize)> = env
        .groups()
        .into_iter()
        .map(|g| (g, env.items_in_group(g).map(|items| items.len()).unwrap_or(0)))
        .collect();

    if json_output {
        let items: Vec<_> = counts
            .iter()
            .map(|(group, count)| json!({ "group": group, "items": count }))
            .collect();
        return output::json(&items);
    }

    if counts.is_empty() {
        output::dimmed("no groups found");
        output::hint("run: psec groups create NAME --clone-from SOURCE");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(group, count)| vec![group.to_string(), count.to_string()])
        .collect();
    output::table(&["GROUP", "ITEMS"], &rows);
    Ok(())
}

/// Show the variables in each group.
pub fn show(ctx: &Context, groups: &[String]) -> Result<()> {
    let env = ctx.load()?;

    for group in groups {
        let descriptions = env.group_descriptions(group)?;
        output::section(group);
        for description in descriptions {
            output::kv(&description.variable, &description.kind);
        }
    }
    Ok(())
}

/// Create a group from a group file or another environment's group.
pub fn create(ctx: &Context, name: &str, clone_from: &str) -> Result<()> {
    let mut env = ctx.load()?;
    let descriptions = env.group_descriptions_from(clone_from, name)?;
    let count = descriptions.len();

    env.add_group(name, descriptions)?;
    env.write_secrets()?;

    info!("Created group {} from {}", name, clone_from);
    output::success(&format!(
        "created group {} ({} variable{})",
        output::key(name),
        count,
        if count == 1 { "" } else { "s" }
    ));
    Ok(())
}

/// Delete a group and the values of its variables.
pub fn delete(ctx: &Context, name: &str, force: bool) -> Result<()> {
    require_force(force, &format!("delete group '{}'", name))?;
    let mut env = ctx.load()?;

    env.delete_group(name)?;
    env.write_secrets()?;

    output::success(&format!("deleted group {}", output::key(name)));
    Ok(())
}

/// Print the descriptions directory path.
pub fn path(ctx: &Context) -> Result<()> {
    let env = ctx.environment(None)?;
    output::data(env.descriptions_path().display());
    Ok(())
}
