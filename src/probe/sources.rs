//! Step 2: locate the source directory of every artifact's package.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::artifacts::ArtifactIndex;
use super::{Diagnostic, BUILD_DESCRIPTOR};
use crate::context::ServiceContext;

/// Package name → source directory containing its `CMakeLists.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceIndex {
    entries: BTreeMap<String, PathBuf>,
}

impl SourceIndex {
    /// Source directory resolved for `package`.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&Path> {
        self.entries.get(package).map(PathBuf::as_path)
    }

    /// Resolved package names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of resolved packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, PathBuf)> for SourceIndex {
    fn from_iter<T: IntoIterator<Item = (String, PathBuf)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Walks `<root>/src` and resolves each artifact package to the first
/// directory of the same name that holds a `CMakeLists.txt`.
///
/// A same-named directory without the descriptor is reported and skipped, so
/// a deeper or later directory can still resolve the package.
pub fn discover(
    ctx: &ServiceContext,
    root: &Path,
    artifacts: &ArtifactIndex,
    diagnostics: &mut Vec<Diagnostic>,
) -> SourceIndex {
    let src = root.join("src");
    let listings = ctx.fs.walk_dirs(&src).unwrap_or_else(|err| {
        tracing::warn!(src = %src.display(), %err, "source walk failed");
        Vec::new()
    });

    let mut resolved: BTreeMap<String, PathBuf> = BTreeMap::new();
    for listing in &listings {
        if resolved.len() == artifacts.len() {
            break;
        }
        for package in artifacts.names() {
            if resolved.contains_key(package) || !listing.subdirs.iter().any(|d| d == package) {
                continue;
            }
            let candidate = listing.path.join(package);
            if ctx.fs.exists(&candidate.join(BUILD_DESCRIPTOR)) {
                tracing::debug!(package, path = %candidate.display(), "resolved source package");
                resolved.insert(package.to_string(), candidate);
            } else {
                diagnostics.push(Diagnostic::MissingBuildDescriptor {
                    package: package.to_string(),
                    path: candidate,
                });
            }
        }
    }

    tracing::info!(count = resolved.len(), visited = listings.len(), "discovered source packages");
    SourceIndex { entries: resolved }
}
