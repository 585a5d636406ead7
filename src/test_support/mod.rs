//! Test utilities and mocks for scriptgate unit tests.
//!
//! Provides in-memory and failing package filesystems so resolution can be
//! tested without touching disk, plus fixtures for on-disk packages.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{MockFileSystem, manifest_with_scripts};
//!
//! let mut fs = MockFileSystem::new();
//! fs.add_file("/pkg/binding.gyp");
//! let fetch = fs.fetch_result("/pkg");
//! ```

pub mod fixtures;

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub use fixtures::*;

use crate::core::{FetchResult, Locator, Manifest, PackageFs};

/// In-memory package filesystem that records every existence check.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: HashSet<PathBuf>,
    probes: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        self.files.insert(path.as_ref().to_path_buf());
    }

    /// Paths passed to `exists`, in call order.
    pub fn probes(&self) -> Vec<PathBuf> {
        self.probes.lock().unwrap().clone()
    }

    /// A fetch result rooted at `prefix` inside this filesystem.
    ///
    /// The returned handle shares the probe log with `self`.
    pub fn fetch_result(&self, prefix: impl Into<PathBuf>) -> FetchResult {
        FetchResult::new(prefix, Arc::new(self.clone()))
    }
}

impl PackageFs for MockFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        self.probes.lock().unwrap().push(path.to_path_buf());
        Ok(self.files.contains(path))
    }
}

/// Filesystem whose every check fails with `PermissionDenied`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFs;

impl FailingFs {
    pub fn fetch_result(prefix: impl Into<PathBuf>) -> FetchResult {
        FetchResult::new(prefix, Arc::new(FailingFs))
    }
}

impl PackageFs for FailingFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("permission denied: {}", path.display()),
        ))
    }
}

/// Fetch result at `/pkg` containing the given files (relative to it).
pub fn fetch_with(files: &[&str]) -> FetchResult {
    let mut fs = MockFileSystem::new();
    for file in files {
        fs.add_file(Path::new("/pkg").join(file));
    }
    fs.fetch_result("/pkg")
}

/// Parse a locator, panicking on malformed input.
pub fn locator(s: &str) -> Locator {
    Locator::parse(s).unwrap()
}

/// Manifest declaring the given scripts, each running `true`.
pub fn manifest_with_scripts(names: &[&str]) -> Manifest {
    Manifest {
        scripts: names
            .iter()
            .map(|name| (name.to_string(), "true".to_string()))
            .collect(),
        ..Manifest::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem_records_probes() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/pkg/binding.gyp");
        let fetch = fs.fetch_result("/pkg");

        assert!(fetch.contains("binding.gyp").unwrap());
        assert!(!fetch.contains("wscript").unwrap());
        assert_eq!(
            fs.probes(),
            vec![PathBuf::from("/pkg/binding.gyp"), PathBuf::from("/pkg/wscript")]
        );
    }

    #[test]
    fn test_failing_fs() {
        let fetch = FailingFs::fetch_result("/pkg");
        let err = fetch.contains("binding.gyp").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
