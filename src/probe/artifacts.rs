//! Step 1: find `build/<package>/compile_commands.json` artifacts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::Pattern;

use super::{Diagnostic, COMPILE_COMMANDS};
use crate::context::ServiceContext;

/// Package name → absolute path of its `compile_commands.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactIndex {
    entries: BTreeMap<String, PathBuf>,
}

impl ArtifactIndex {
    /// Builds an index from artifact paths. The package name is the parent
    /// directory name; a later path with the same name replaces an earlier one.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut entries = BTreeMap::new();
        for path in paths {
            let Some(name) = package_name(&path) else {
                tracing::debug!(path = %path.display(), "artifact without a package directory");
                continue;
            };
            if let Some(previous) = entries.insert(name, path) {
                tracing::debug!(previous = %previous.display(), "artifact replaced by later match");
            }
        }
        Self { entries }
    }

    /// Path of the artifact for `package`.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&Path> {
        self.entries.get(package).map(PathBuf::as_path)
    }

    /// Package names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(package, artifact)` pairs in package-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no artifacts were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Glob pattern searched for artifacts under `root`.
#[must_use]
pub fn artifact_pattern(root: &Path) -> String {
    let escaped = Pattern::escape(&root.to_string_lossy());
    format!("{escaped}/build/*/{COMPILE_COMMANDS}")
}

/// Globs the workspace build tree and indexes what it finds.
///
/// Reports `NoArtifacts` when nothing matches; a failing glob is treated the
/// same way.
pub fn discover(
    ctx: &ServiceContext,
    root: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> ArtifactIndex {
    let pattern = artifact_pattern(root);
    let paths = ctx.fs.glob(&pattern).unwrap_or_else(|err| {
        tracing::warn!(%pattern, %err, "artifact glob failed");
        Vec::new()
    });
    if paths.is_empty() {
        diagnostics.push(Diagnostic::NoArtifacts {
            pattern: format!("{}/build/*/{COMPILE_COMMANDS}", root.display()),
            root: root.to_path_buf(),
        });
    }
    let index = ArtifactIndex::from_paths(paths);
    tracing::info!(count = index.len(), "discovered build artifacts");
    index
}

fn package_name(path: &Path) -> Option<String> {
    path.parent()?.file_name()?.to_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::config::Settings;
    use crate::probe::LinkLayout;
    use serde_json::json;

    fn replay_glob(output: serde_json::Value) -> ServiceContext {
        let settings = Settings { root: PathBuf::from("/ws"), layout: LinkLayout::BuildDir };
        ServiceContext::replaying_cassette(&Cassette::new(
            "artifacts",
            &settings,
            vec![Interaction {
                seq: 0,
                method: "glob".into(),
                input: json!({"pattern": "/ws/build/*/compile_commands.json"}),
                output,
            }],
        ))
    }

    #[test]
    fn indexes_artifacts_by_parent_directory() {
        let ctx = replay_glob(json!({"ok": [
            "/ws/build/pkg_a/compile_commands.json",
            "/ws/build/pkg_b/compile_commands.json",
        ]}));
        let mut diagnostics = Vec::new();
        let index = discover(&ctx, Path::new("/ws"), &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["pkg_a", "pkg_b"]);
        assert_eq!(
            index.get("pkg_b"),
            Some(Path::new("/ws/build/pkg_b/compile_commands.json"))
        );
    }

    #[test]
    fn empty_glob_reports_pattern_and_root() {
        let ctx = replay_glob(json!({"ok": []}));
        let mut diagnostics = Vec::new();
        let index = discover(&ctx, Path::new("/ws"), &mut diagnostics);

        assert!(index.is_empty());
        assert_eq!(
            diagnostics,
            vec![Diagnostic::NoArtifacts {
                pattern: "/ws/build/*/compile_commands.json".into(),
                root: "/ws".into(),
            }]
        );
    }

    #[test]
    fn failed_glob_counts_as_nothing_found() {
        let ctx = replay_glob(json!({"err": "Pattern syntax error"}));
        let mut diagnostics = Vec::new();
        let index = discover(&ctx, Path::new("/ws"), &mut diagnostics);
        assert!(index.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn later_duplicate_wins() {
        let index = ArtifactIndex::from_paths([
            PathBuf::from("/ws/build/pkg/compile_commands.json"),
            PathBuf::from("/other/build/pkg/compile_commands.json"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("pkg"), Some(Path::new("/other/build/pkg/compile_commands.json")));
    }

    #[test]
    fn pattern_escapes_glob_metacharacters_in_root() {
        assert_eq!(
            artifact_pattern(Path::new("/ws[1]")),
            "/ws[[]1[]]/build/*/compile_commands.json"
        );
    }
}
