//! Filesystem bootstrap and cleanup helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Creates every listed directory under `root`, with parents, if missing.
///
/// On Unix, a newly created directory gets mode `0775` so the web server
/// group can write into it.
pub fn ensure_dirs(root: &Path, dirs: &[&str]) -> Result<()> {
    for rel in dirs {
        let dir = root.join(rel);
        if dir.exists() {
            continue;
        }
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dir, fs::Permissions::from_mode(0o775))
                .with_context(|| format!("failed to set mode on {}", dir.display()))?;
        }
        tracing::debug!(dir = %dir.display(), "created runtime directory");
    }
    Ok(())
}

/// Copies `src` to `dest` unless `dest` already exists.
///
/// Returns `true` when a copy happened. Used to bootstrap local config
/// files from their distributed templates; repeated runs are no-ops.
pub fn copy_if_missing(src: &Path, dest: &Path) -> Result<bool> {
    if dest.exists() {
        return Ok(false);
    }
    fs::copy(src, dest).with_context(|| {
        format!("failed to copy {} to {}", src.display(), dest.display())
    })?;
    Ok(true)
}

/// Recursively deletes a directory tree without following symlinks.
///
/// Symlinks are unlinked, never traversed, even when they point at
/// directories, so a cyclic link cannot cause unbounded recursion and a
/// link's target is never touched. Does nothing when `path` is not a
/// real directory.
pub fn remove_tree(path: &Path) -> Result<()> {
    let is_real_dir = path
        .symlink_metadata()
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_real_dir {
        return Ok(());
    }
    for entry in
        fs::read_dir(path).with_context(|| format!("failed to list {}", path.display()))?
    {
        let entry = entry.with_context(|| format!("failed to list {}", path.display()))?;
        let child = entry.path();
        let meta = fs::symlink_metadata(&child)
            .with_context(|| format!("failed to stat {}", child.display()))?;
        if meta.is_dir() {
            remove_tree(&child)?;
        } else {
            fs::remove_file(&child)
                .with_context(|| format!("failed to remove {}", child.display()))?;
        }
    }
    fs::remove_dir(path)
        .with_context(|| format!("failed to remove directory {}", path.display()))?;
    Ok(())
}
