//! Audit command.
//!
//! Report (or remove) "other" permissions under the base directory.

use crate::cli::{output, Context};
use crate::core::{paths, perms};
use crate::error::Result;

/// Scan the base directory for paths other users can access.
pub fn execute(ctx: &Context, fix: bool, verbose: u8) -> Result<()> {
    let base_dir = ctx.base_dir()?;
    paths::ensure_valid_base_dir(&base_dir)?;

    if !perms::supports_permissions(&base_dir) {
        output::warn(&format!(
            "{} has no POSIX permissions, nothing to audit",
            output::path(base_dir.display())
        ));
        return Ok(());
    }

    let findings = perms::audit_permissions(&base_dir, verbose)?;
    if findings.is_empty() {
        output::success(&format!(
            "no paths accessible to other users under {}",
            output::path(base_dir.display())
        ));
        return Ok(());
    }

    output::warn(&format!(
        "{} path{} accessible to other users",
        findings.len(),
        if findings.len() == 1 { "" } else { "s" }
    ));
    for finding in &findings {
        output::data(finding);
    }

    if fix {
        perms::strip_other_permissions(&base_dir)?;
        output::success("removed other-user access");
    } else {
        output::hint("run: psec audit --fix");
    }
    Ok(())
}
