//! Generate command - fill variables with generated values.

use tracing::{debug, info};

use crate::cli::{output, Context};
use crate::core::generate::{GenerateOptions, Registry};
use crate::error::{Error, GeneratorError, Result, SecretError};

/// Generate values for `variables`, or every described variable.
///
/// Variables whose type can't be generated are skipped. A variable whose
/// generator lacks an input (such as `--user` for digests) is skipped with
/// a warning when generating everything, and is an error when named.
pub fn execute(ctx: &Context, variables: &[String], options: &GenerateOptions) -> Result<()> {
    let mut env = ctx.load()?;
    let registry = Registry::new();
    let explicit = !variables.is_empty();

    let targets: Vec<String> = if explicit {
        for variable in variables {
            if !env.is_described(variable) {
                return Err(SecretError::Undescribed(variable.clone()).into());
            }
        }
        variables.to_vec()
    } else {
        env.descriptions().map(|d| d.variable.clone()).collect()
    };

    let mut generated = 0;
    for variable in &targets {
        let kind = env.get_secret_type(variable).unwrap_or_default().to_string();
        let handler = registry.handler(&kind)?;

        let value = match handler.generate(options) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("{} ({}) is not generable, skipping", variable, kind);
                continue;
            }
            Err(Error::Generator(err @ GeneratorError::MissingArgument { .. })) if !explicit => {
                output::warn(&format!("skipping {}: {}", output::key(variable), err));
                continue;
            }
            Err(e) => return Err(e),
        };

        env.set_secret(variable, value)?;
        generated += 1;
        info!("Generated {} ({})", variable, kind);
    }

    env.write_secrets()?;
    if generated == 0 {
        output::dimmed("no generable variables");
    } else {
        output::success(&format!(
            "generated {} value{}",
            generated,
            if generated == 1 { "" } else { "s" }
        ));
    }
    Ok(())
}
