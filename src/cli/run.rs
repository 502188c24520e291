//! Run command.
//!
//! Executes a command with the environment's secrets exported.

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::Context;
use crate::core::environment::SecretsEnvironment;
use crate::error::Result;

/// Run a command with secrets injected as environment variables.
pub fn execute(ctx: &Context, command: &[String]) -> Result<()> {
    let env = ctx.load()?;
    let exit_code = run_with_secrets(&env, command)?;
    std::process::exit(exit_code);
}

/// Run `command` with the environment's exported variables set.
fn run_with_secrets(env: &SecretsEnvironment, command: &[String]) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| crate::error::Error::Other("no command specified".to_string()))?;

    let mut cmd = std::process::Command::new(program);
    cmd.args(args);

    for (name, value) in env.exported_variables() {
        let value = Zeroizing::new(value);
        cmd.env(name, value.as_str());
    }
    debug!("Running {} in environment {}", program, env.name());

    let status = cmd.status()?;
    Ok(status.code().unwrap_or(1))
}
