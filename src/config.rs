//! Run settings resolved from the command line and environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::probe::LinkLayout;

/// Environment variable selecting the link layout.
pub const LAYOUT_ENV: &str = "COMPDB_LINK_LAYOUT";

/// Environment variable naming a directory to record a cassette into.
pub const RECORD_ENV: &str = "COMPDB_LINK_RECORD";

/// Settings for one probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute workspace root.
    pub root: PathBuf,
    /// Where links are placed inside each source package.
    pub layout: LinkLayout,
}

impl Settings {
    /// Resolves settings from parsed arguments and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or the layout
    /// variable holds an unknown value.
    pub fn resolve(cli: &Cli) -> Result<Self, String> {
        let layout = env::var(LAYOUT_ENV).ok();
        Self::from_parts(cli.path.as_deref(), layout.as_deref())
    }

    /// Builds settings from an optional root path and layout string.
    ///
    /// The root defaults to the current directory and is made absolute but
    /// not canonicalized, so symlinked workspaces keep their path.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be made absolute or the layout is
    /// unknown.
    pub fn from_parts(path: Option<&Path>, layout: Option<&str>) -> Result<Self, String> {
        let root = match path {
            Some(path) => std::path::absolute(path)
                .map_err(|e| format!("failed to resolve path {}: {e}", path.display()))?,
            None => env::current_dir()
                .map_err(|e| format!("failed to get current directory: {e}"))?,
        };
        let layout = match layout {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => LinkLayout::default(),
        };
        Ok(Self { root, layout })
    }
}
