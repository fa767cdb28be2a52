//! Filesystem port for workspace discovery and link maintenance.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Boxed error returned by port methods.
pub type FsError = Box<dyn std::error::Error + Send + Sync>;

/// One directory visited during a recursive walk, with the names of its
/// immediate subdirectories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirListing {
    /// Path of the visited directory.
    pub path: PathBuf,
    /// Names of immediate subdirectories (symlinks to directories included).
    pub subdirs: Vec<String>,
}

/// Provides the filesystem queries and mutations the prober needs.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path is a directory (symlinks followed).
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists (symlinks followed).
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if any entry exists at the path, without following a
    /// final symlink. Dangling links count as present.
    fn entry_exists(&self, path: &Path) -> bool;

    /// Expands a glob pattern into the matching paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, FsError>;

    /// Walks the tree under `root` in pre-order, following symlinks, and
    /// returns one listing per directory visited. A missing root yields an
    /// empty walk.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk cannot be started.
    fn walk_dirs(&self, root: &Path) -> Result<Vec<DirListing>, FsError>;

    /// Creates a single directory. The parent must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir(&self, path: &Path) -> Result<(), FsError>;

    /// Removes a file or symlink. Directories are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;

    /// Creates a symbolic link at `link` pointing to `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created or the platform has no
    /// symlink support.
    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError>;
}
