//! Operator-facing diagnostics and the mutations a run performed.

use std::fmt;
use std::path::PathBuf;

/// A condition reported to the operator on standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The workspace root is not an existing directory. Nothing else runs.
    RootMissing {
        /// Root that was probed.
        root: PathBuf,
    },
    /// The artifact glob matched nothing.
    NoArtifacts {
        /// Glob pattern that was searched, unescaped.
        pattern: String,
        /// Workspace root the pattern was built from.
        root: PathBuf,
    },
    /// A directory named after a package has no `CMakeLists.txt`.
    MissingBuildDescriptor {
        /// Package name the directory matched.
        package: String,
        /// Directory lacking the descriptor.
        path: PathBuf,
    },
    /// Names present on only one side of the artifact/source join.
    Unmatched {
        /// Unmatched names, sorted.
        packages: Vec<String>,
    },
    /// An entry already sits at the link location and will be replaced.
    LinkPresent {
        /// Package being linked.
        package: String,
    },
    /// Nothing sits at the link location yet.
    LinkMissing {
        /// Package being linked.
        package: String,
    },
    /// The package's `build` directory already exists.
    ReusingBuildDir {
        /// Package being linked.
        package: String,
        /// Existing `build` directory.
        path: PathBuf,
    },
    /// The package's `build` directory is about to be created.
    CreatingBuildDir {
        /// Package being linked.
        package: String,
        /// `build` directory to create.
        path: PathBuf,
    },
}

impl Diagnostic {
    /// Whether this diagnostic signals something the operator should fix.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::RootMissing { .. }
                | Self::NoArtifacts { .. }
                | Self::MissingBuildDescriptor { .. }
                | Self::Unmatched { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootMissing { root } => {
                write!(f, "Path does not seem to exist: {}", root.display())
            }
            Self::NoArtifacts { pattern, root } => {
                writeln!(f, "Found no compile_commands.json files matching {pattern}")?;
                write!(
                    f,
                    "Is the workspace path {} correct, and has the workspace been built \
                     with -DCMAKE_EXPORT_COMPILE_COMMANDS=1?",
                    root.display()
                )
            }
            Self::MissingBuildDescriptor { package, path } => {
                write!(f, "Couldn't find a CMakeLists.txt file for {package} in {}", path.display())
            }
            Self::Unmatched { packages } => {
                writeln!(f, "Couldn't find a matching src package for these builds:")?;
                for package in packages {
                    writeln!(f, "  {package}")?;
                }
                write!(
                    f,
                    "If any of these should be accounted for, make sure the package directory \
                     name and the project name are the same."
                )
            }
            Self::LinkPresent { package } => write!(
                f,
                "compile_commands.json already present for {package}, replacing it with a new link"
            ),
            Self::LinkMissing { package } => {
                write!(f, "missing compile_commands.json for {package}")
            }
            Self::ReusingBuildDir { path, .. } => {
                write!(f, "linking into existing build folder {}", path.display())
            }
            Self::CreatingBuildDir { path, .. } => {
                write!(f, "creating new build folder {}", path.display())
            }
        }
    }
}

/// A filesystem change performed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A `build` directory was created.
    CreatedDir {
        /// Directory created.
        path: PathBuf,
    },
    /// A pre-existing entry at the link location was removed.
    RemovedEntry {
        /// Path of the removed file or link.
        path: PathBuf,
    },
    /// A symbolic link was created.
    CreatedLink {
        /// Package the link belongs to.
        package: String,
        /// Path of the new link.
        link: PathBuf,
        /// Artifact the link points to.
        target: PathBuf,
    },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatedDir { path } => write!(f, "created {}", path.display()),
            Self::RemovedEntry { path } => write!(f, "removed {}", path.display()),
            Self::CreatedLink { package, link, target } => {
                write!(f, "linked {package}: {} -> {}", link.display(), target.display())
            }
        }
    }
}
