//! Live filesystem adapter using `std::fs`, `glob` and `walkdir`.

use std::path::{Path, PathBuf};

use glob::MatchOptions;
use walkdir::WalkDir;

use crate::ports::filesystem::{DirListing, FileSystem, FsError};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn entry_exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, FsError> {
        // `*` does not match hidden directories, as in a shell.
        let options = MatchOptions { require_literal_leading_dot: true, ..MatchOptions::new() };
        let mut paths = Vec::new();
        for entry in glob::glob_with(pattern, options)? {
            match entry {
                Ok(path) => paths.push(path),
                Err(err) => tracing::debug!(%err, "skipping unreadable glob entry"),
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn walk_dirs(&self, root: &Path) -> Result<Vec<DirListing>, FsError> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }
        let mut listings = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Covers permission errors and symlink cycles.
                    tracing::debug!(%err, "skipping entry during walk");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            listings.push(DirListing {
                path: entry.path().to_path_buf(),
                subdirs: subdirs_of(entry.path()),
            });
        }
        Ok(listings)
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        tracing::debug!(path = %path.display(), "create_dir");
        Ok(std::fs::create_dir(path)?)
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        tracing::debug!(path = %path.display(), "remove_file");
        Ok(std::fs::remove_file(path)?)
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        tracing::debug!(target = %target.display(), link = %link.display(), "symlink");
        create_symlink(target, link)
    }
}

/// Names of the immediate subdirectories of `dir`, sorted. Unreadable
/// directories list as empty.
fn subdirs_of(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), %err, "cannot list directory");
            return Vec::new();
        }
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .collect();
    names.sort();
    names
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> Result<(), FsError> {
    Ok(std::os::unix::fs::symlink(target, link)?)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> Result<(), FsError> {
    Ok(std::os::windows::fs::symlink_file(target, link)?)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_target: &Path, _link: &Path) -> Result<(), FsError> {
    Err("symbolic links are not supported on this platform".into())
}
