//! Filesystem utilities.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::MANIFEST_NAME;

/// Find the nearest `package.json`, searching `start` and its ancestors.
pub fn find_manifest(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    bail!(
        "could not find `{}` in `{}` or any parent directory",
        MANIFEST_NAME,
        start.display()
    )
}

/// Canonicalize a path, but don't fail if it doesn't exist yet.
/// Returns the path as-is if canonicalization fails.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
