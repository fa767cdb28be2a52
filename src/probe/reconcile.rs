//! Step 3: join artifacts and sources by package name.

use std::collections::BTreeSet;
use std::path::PathBuf;

use super::artifacts::ArtifactIndex;
use super::sources::SourceIndex;
use super::LinkLayout;

/// An artifact paired with the source package it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Package name shared by both sides.
    pub package: String,
    /// Absolute path of the build artifact (the link target).
    pub artifact: PathBuf,
    /// Source package directory.
    pub source_dir: PathBuf,
    /// Where the link is placed.
    pub link: PathBuf,
}

/// Outcome of joining the two indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Matches in package-name order.
    pub matches: Vec<Match>,
    /// Names present in exactly one index, sorted.
    pub unmatched: Vec<String>,
}

/// Pairs every resolved source with its artifact and collects the symmetric
/// difference of the two name sets.
///
/// A package whose directory lacked `CMakeLists.txt` is never resolved, so it
/// shows up in `unmatched` as well.
#[must_use]
pub fn reconcile(
    artifacts: &ArtifactIndex,
    sources: &SourceIndex,
    layout: LinkLayout,
) -> Reconciliation {
    let built: BTreeSet<&str> = artifacts.names().collect();
    let found: BTreeSet<&str> = sources.names().collect();

    let unmatched = built.symmetric_difference(&found).map(|name| (*name).to_string()).collect();

    let matches = artifacts
        .iter()
        .filter_map(|(package, artifact)| {
            let source_dir = sources.get(package)?;
            Some(Match {
                package: package.to_string(),
                artifact: artifact.to_path_buf(),
                source_dir: source_dir.to_path_buf(),
                link: layout.link_path(source_dir),
            })
        })
        .collect();

    Reconciliation { matches, unmatched }
}
