//! Error types for the link-creation phase.

use std::path::PathBuf;

use crate::ports::FsError;

/// A filesystem mutation failed. Ends the run at the failing package.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The entry already at the link location could not be removed.
    #[error("failed to remove existing {} for {package}: {source}", path.display())]
    RemoveEntry {
        /// Package being linked.
        package: String,
        /// Entry that was to be removed.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: FsError,
    },

    /// The package's `build` directory could not be created.
    #[error("failed to create build directory {} for {package}: {source}", path.display())]
    CreateDir {
        /// Package being linked.
        package: String,
        /// Directory that was to be created.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: FsError,
    },

    /// The symbolic link itself could not be created.
    #[error(
        "failed to link {} -> {} for {package}: {source}",
        link.display(),
        target.display()
    )]
    Link {
        /// Package being linked.
        package: String,
        /// Path the link was to be created at.
        link: PathBuf,
        /// Artifact the link points to.
        target: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: FsError,
    },
}

impl ProbeError {
    /// Package whose link could not be created.
    #[must_use]
    pub fn package(&self) -> &str {
        match self {
            Self::RemoveEntry { package, .. }
            | Self::CreateDir { package, .. }
            | Self::Link { package, .. } => package,
        }
    }
}
