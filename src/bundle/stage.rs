//! Staging directory assembly.
//!
//! Recreates the staging directory from scratch on every run and copies the
//! fixed file set into it. Prior contents are destroyed unconditionally, so
//! stale files from earlier runs never leak into the archive.

use crate::error::{Result, StageError};
use std::path::Path;
use tokio::fs;

/// The fixed set of files that make up a distributable build.
///
/// Entries may be files or directories; directories are copied recursively.
/// Missing entries are skipped without error.
pub const STAGED_FILES: [&str; 7] = [
    "manifest.json",
    "background.js",
    "offscreen.html",
    "offscreen.js",
    "turndown.js",
    "README.md",
    "icons",
];

/// Recreate `dest` empty and copy the fixed file set from `root` into it.
pub async fn stage(root: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_dir_all(dest).await?;
    }
    fs::create_dir_all(dest).await?;

    for entry in STAGED_FILES {
        let src = root.join(entry);
        let out = dest.join(entry);
        if src.is_dir() {
            copy_dir(&src, &out).await?;
        } else if src.is_file() {
            copy_file(&src, &out).await?;
        } else {
            log::debug!("staging: '{entry}' not present, skipping");
        }
    }

    Ok(())
}

/// Copies a regular file, creating any parent directories of the destination
/// as necessary. `fs::copy` carries permission bits where the platform
/// supports it.
async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await.map_err(|e| StageError::CopyFailed {
        entry: from.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Recursively copies a directory, creating any parent directories of the
/// destination as necessary.
async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).await?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry.map_err(StageError::from)?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| StageError::CopyFailed {
                entry: entry.path().display().to_string(),
                reason: e.to_string(),
            })?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(dest_path).await?;
        } else {
            fs::copy(entry.path(), dest_path).await?;
        }
    }

    Ok(())
}
