//! Fetched package trees.
//!
//! The fetch stage owns the files; this side only ever asks whether a path
//! exists inside them.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read-only view of a package's file tree.
pub trait PackageFs: Send + Sync {
    /// Whether `path` exists.
    ///
    /// A missing file is `Ok(false)`; any other failure (permissions, I/O)
    /// is an error.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// `PackageFs` backed by the real filesystem, rooted at a directory.
#[derive(Debug, Clone)]
pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DiskFs { root: root.into() }
    }
}

impl PackageFs for DiskFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        self.root.join(path).try_exists()
    }
}

/// The materialized tree of a fetched package.
#[derive(Clone)]
pub struct FetchResult {
    /// Package root inside `package_fs`
    pub prefix_path: PathBuf,

    /// Handle used for existence checks
    pub package_fs: Arc<dyn PackageFs>,
}

impl FetchResult {
    pub fn new(prefix_path: impl Into<PathBuf>, package_fs: Arc<dyn PackageFs>) -> Self {
        FetchResult {
            prefix_path: prefix_path.into(),
            package_fs,
        }
    }

    /// A package unpacked into `dir` on disk.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(".", Arc::new(DiskFs::new(dir)))
    }

    /// Path of `file` directly under the package root.
    pub fn path_of(&self, file: &str) -> PathBuf {
        self.prefix_path.join(file)
    }

    /// Whether `file` exists directly under the package root.
    pub fn contains(&self, file: &str) -> io::Result<bool> {
        self.package_fs.exists(&self.path_of(file))
    }
}

impl fmt::Debug for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchResult")
            .field("prefix_path", &self.prefix_path)
            .finish_non_exhaustive()
    }
}
