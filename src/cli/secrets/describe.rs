//! Describe command - show variable descriptions or secret types.

use crate::cli::{output, Context};
use crate::core::description::Description;
use crate::core::generate::Registry;
use crate::error::{Error, Result, SecretError};

/// Describe `variables` (all when empty), or with `types` every secret type.
pub fn execute(ctx: &Context, variables: &[String], types: bool, json_output: bool) -> Result<()> {
    if types {
        return describe_types(json_output);
    }

    let env = ctx.load()?;
    let descriptions: Vec<&Description> = if variables.is_empty() {
        env.descriptions().collect()
    } else {
        variables
            .iter()
            .map(|v| {
                env.describe_variable(v)
                    .ok_or_else(|| Error::from(SecretError::Undescribed(v.clone())))
            })
            .collect::<Result<_>>()?
    };

    if json_output {
        let items: Vec<_> = descriptions
            .iter()
            .map(|d| -> Result<serde_json::Value> {
                let mut value = serde_json::to_value(d)?;
                if let (Some(object), Some(group)) = (value.as_object_mut(), env.group_of(&d.variable)) {
                    object.insert("Group".to_string(), group.into());
                }
                Ok(value)
            })
            .collect::<Result<_>>()?;
        return output::json(&items);
    }

    if descriptions.is_empty() {
        output::dimmed("no descriptions found");
        output::hint("run: psec groups create NAME --clone-from SOURCE");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = descriptions
        .iter()
        .map(|d| {
            vec![
                d.variable.clone(),
                env.group_of(&d.variable).unwrap_or_default().to_string(),
                d.kind.clone(),
                d.prompt.clone().unwrap_or_default(),
                d.options.clone().unwrap_or_default(),
                d.help.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output::table(&["VARIABLE", "GROUP", "TYPE", "PROMPT", "OPTIONS", "HELP"], &rows);
    Ok(())
}

fn describe_types(json_output: bool) -> Result<()> {
    let types = Registry::new().describe_all();
    if json_output {
        return output::json(&types);
    }

    let rows: Vec<Vec<String>> = types
        .iter()
        .map(|t| {
            vec![
                t.kind.to_string(),
                if t.generable { "yes" } else { "no" }.to_string(),
                t.description.to_string(),
            ]
        })
        .collect();
    output::table(&["TYPE", "GENERABLE", "DESCRIPTION"], &rows);
    Ok(())
}
