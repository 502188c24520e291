//! Permission helpers.
//!
//! Creates private directories, clamps "other" permission bits after copies,
//! and audits trees for world-accessible entries. Filesystems without POSIX
//! permission bits (FAT, exFAT, NTFS, SMB shares) are detected and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::constants;
use crate::error::Result;

/// A path whose mode grants "other" access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: PathBuf,
    pub mode: u32,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:o} {}", self.mode, self.path.display())
    }
}

/// Apply a Unix mode when supported.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}

/// Create a directory (and parents) and restrict it to `mode`.
pub fn create_private_dir(path: &Path, mode: u32) -> Result<()> {
    fs::create_dir_all(path)?;
    if supports_permissions(path) {
        set_mode(path, mode)?;
    }
    Ok(())
}

/// Filesystem type name for `path`, when the platform can tell.
#[cfg(target_os = "linux")]
pub fn filesystem_type(path: &Path) -> Option<String> {
    let stat = nix::sys::statfs::statfs(path).ok()?;
    let name = match (stat.filesystem_type().0 as u64) & 0xFFFF_FFFF {
        0x4d44 => "msdos",
        0x2011_bab0 => "exfat",
        0x5346_544e => "ntfs",
        0x517b => "smbfs",
        0xfe53_4d42 => "smb2",
        0xff53_4d42 => "cifs",
        0x786f_4256 => "vboxsf",
        0xef53 => "ext4",
        0x5846_5342 => "xfs",
        0x2fc1_2fc1 => "zfs",
        _ => "other",
    };
    Some(name.to_string())
}

/// Filesystem type name for `path`, when the platform can tell.
#[cfg(target_os = "macos")]
pub fn filesystem_type(path: &Path) -> Option<String> {
    let stat = nix::sys::statfs::statfs(path).ok()?;
    Some(stat.filesystem_type_name().to_string())
}

/// Filesystem type name for `path`, when the platform can tell.
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn filesystem_type(_path: &Path) -> Option<String> {
    None
}

/// Whether the filesystem holding `path` honours POSIX permission bits.
///
/// Checks the nearest existing ancestor so it also works for paths about
/// to be created.
pub fn supports_permissions(path: &Path) -> bool {
    if cfg!(not(unix)) {
        return false;
    }
    let existing = path.ancestors().find(|p| p.exists()).unwrap_or(path);
    !matches!(
        filesystem_type(existing).as_deref(),
        Some("msdos" | "exfat" | "ntfs" | "smbfs" | "smb2" | "cifs" | "vboxsf")
    )
}

/// Recursively clear the "other" read/write/execute bits under `path`.
///
/// Symbolic links are left alone. Skipped (with a log line) on filesystems
/// without POSIX permission bits.
pub fn strip_other_permissions(path: &Path) -> Result<()> {
    if !supports_permissions(path) {
        debug!(path = %path.display(), "filesystem has no permission bits, not clamping");
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        for entry in WalkDir::new(path).follow_links(false) {
            let entry = entry.map_err(walk_error)?;
            if entry.path_is_symlink() {
                continue;
            }
            let mode = entry.metadata().map_err(walk_error)?.permissions().mode() & 0o7777;
            if mode & constants::OTHER_PERMISSION_BITS != 0 {
                let clamped = mode & !constants::OTHER_PERMISSION_BITS;
                debug!(path = %entry.path().display(), from = format!("{:o}", mode), to = format!("{:o}", clamped), "clamping permissions");
                fs::set_permissions(entry.path(), fs::Permissions::from_mode(clamped))?;
            }
        }
    }

    Ok(())
}

/// Report every path under `base_dir` whose mode includes an "other" bit.
///
/// Purely informational: nothing is changed. With `verbose > 1` every
/// checked path is logged.
pub fn audit_permissions(base_dir: &Path, verbose: u8) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();

    if !supports_permissions(base_dir) {
        warn!(path = %base_dir.display(), "filesystem has no permission bits, nothing to audit");
        return Ok(findings);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        for entry in WalkDir::new(base_dir).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(walk_error)?;
            if entry.path_is_symlink() {
                continue;
            }
            let mode = entry.metadata().map_err(walk_error)?.permissions().mode() & 0o7777;
            if verbose > 1 {
                debug!(path = %entry.path().display(), mode = format!("{:o}", mode), "checked");
            }
            if mode & constants::OTHER_PERMISSION_BITS != 0 {
                findings.push(Finding {
                    path: entry.path().to_path_buf(),
                    mode,
                });
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = verbose;
    }

    Ok(findings)
}

fn walk_error(err: walkdir::Error) -> crate::error::Error {
    match err.into_io_error() {
        Some(io) => io.into(),
        None => crate::error::Error::Other("filesystem loop while walking".to_string()),
    }
}
