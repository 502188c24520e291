//! Init command - initialize a secrets base directory.

use std::path::PathBuf;

use tracing::info;

use crate::cli::{output, Context};
use crate::core::paths;
use crate::error::Result;

/// Create the base directory and its marker file.
pub fn execute(ctx: &Context, basedir: Option<PathBuf>) -> Result<()> {
    let base_dir = match basedir {
        Some(dir) => dir,
        None => ctx.base_dir()?,
    };

    if paths::is_valid_base_dir(&base_dir) {
        output::dimmed(&format!(
            "already initialized: {}",
            output::path(base_dir.display())
        ));
        return Ok(());
    }

    info!("Initializing base directory: {}", base_dir.display());
    paths::init_base_dir(&base_dir)?;
    output::success(&format!("initialized {}", output::path(base_dir.display())));
    output::hint(&format!(
        "next: {}",
        output::cmd("psec environments create NAME")
    ));
    Ok(())
}
