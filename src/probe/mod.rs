//! Workspace prober: links `build/<pkg>/compile_commands.json` into the
//! matching source package under `src/`.
//!
//! A run is four steps over immutable snapshots:
//!
//! ```text
//! artifacts::discover  ──► ArtifactIndex ─┐
//!                                          ├─► reconcile ──► link::apply
//! sources::discover    ──► SourceIndex ───┘
//! ```
//!
//! All filesystem access goes through `ctx.fs`, so a run can be recorded
//! or replayed from a cassette.

pub mod artifacts;
pub mod diagnostic;
pub mod error;
pub mod link;
pub mod reconcile;
pub mod sources;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use diagnostic::{Diagnostic, Mutation};
pub use error::ProbeError;
pub use reconcile::Match;

use crate::config::Settings;
use crate::context::ServiceContext;

/// File name of the compilation database CMake exports.
pub const COMPILE_COMMANDS: &str = "compile_commands.json";

/// File that marks a directory as a buildable package.
pub const BUILD_DESCRIPTOR: &str = "CMakeLists.txt";

/// Where the link is placed inside a source package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkLayout {
    /// `<pkg>/build/compile_commands.json`, creating `build/` when missing.
    #[default]
    BuildDir,
    /// `<pkg>/compile_commands.json`.
    PackageRoot,
}

impl LinkLayout {
    /// Link location for a package rooted at `source_dir`.
    #[must_use]
    pub fn link_path(self, source_dir: &Path) -> PathBuf {
        match self {
            Self::BuildDir => source_dir.join("build").join(COMPILE_COMMANDS),
            Self::PackageRoot => source_dir.join(COMPILE_COMMANDS),
        }
    }

    /// Directory that must exist before linking, if the layout needs one.
    #[must_use]
    pub fn build_dir(self, source_dir: &Path) -> Option<PathBuf> {
        match self {
            Self::BuildDir => Some(source_dir.join("build")),
            Self::PackageRoot => None,
        }
    }
}

impl FromStr for LinkLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "build-dir" | "build_dir" | "build" => Ok(Self::BuildDir),
            "package-root" | "package_root" | "package" => Ok(Self::PackageRoot),
            other => Err(format!(
                "unknown link layout {other:?} (expected \"build-dir\" or \"package-root\")"
            )),
        }
    }
}

/// Everything a run discovered, reported and changed.
#[derive(Debug, Default)]
pub struct ProbeReport {
    /// Workspace root that was probed.
    pub root: PathBuf,
    /// Artifact/source pairs that were (or were to be) linked.
    pub matches: Vec<Match>,
    /// Reported conditions, in the order they occurred.
    pub diagnostics: Vec<Diagnostic>,
    /// Filesystem changes that completed.
    pub mutations: Vec<Mutation>,
    /// The mutation failure that ended the run early, if any.
    pub failure: Option<ProbeError>,
}

impl ProbeReport {
    /// Links created by this run.
    pub fn links(&self) -> impl Iterator<Item = &Mutation> {
        self.mutations.iter().filter(|m| matches!(m, Mutation::CreatedLink { .. }))
    }

    /// Number of diagnostics that are warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }
}

/// Probes the workspace at `settings.root` and links every match.
///
/// A missing root is reported as a diagnostic without touching anything else.
/// Discovery problems become diagnostics; the first mutation failure stops the
/// run and is stored in [`ProbeReport::failure`].
#[must_use]
pub fn probe(ctx: &ServiceContext, settings: &Settings) -> ProbeReport {
    let root = settings.root.as_path();
    let mut report = ProbeReport { root: root.to_path_buf(), ..ProbeReport::default() };

    if !ctx.fs.is_dir(root) {
        report.diagnostics.push(Diagnostic::RootMissing { root: root.to_path_buf() });
        return report;
    }

    let artifacts = artifacts::discover(ctx, root, &mut report.diagnostics);
    let sources = sources::discover(ctx, root, &artifacts, &mut report.diagnostics);

    let reconciliation = reconcile::reconcile(&artifacts, &sources, settings.layout);
    if !reconciliation.unmatched.is_empty() {
        report.diagnostics.push(Diagnostic::Unmatched { packages: reconciliation.unmatched });
    }
    report.matches = reconciliation.matches;

    if let Err(err) = link::apply(
        ctx,
        &report.matches,
        settings.layout,
        &mut report.diagnostics,
        &mut report.mutations,
    ) {
        tracing::warn!(package = err.package(), %err, "link creation failed");
        report.failure = Some(err);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn settings(root: &str) -> Settings {
        Settings { root: PathBuf::from(root), layout: LinkLayout::BuildDir }
    }

    fn replay(outputs: Vec<(&str, serde_json::Value)>) -> ServiceContext {
        let interactions = outputs
            .into_iter()
            .zip(0..)
            .map(|((method, output), seq)| Interaction {
                seq,
                method: method.into(),
                input: json!({}),
                output,
            })
            .collect();
        ServiceContext::replaying_cassette(&Cassette::new("probe", &settings("/ws"), interactions))
    }

    #[test]
    fn missing_root_reports_path_and_stops() {
        // Any port call beyond is_dir would exhaust the cassette and panic.
        let ctx = replay(vec![("is_dir", json!(false))]);
        let report = probe(&ctx, &settings("/nonexistent/path"));

        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::RootMissing { root: PathBuf::from("/nonexistent/path") }]
        );
        assert!(report.diagnostics[0].to_string().contains("/nonexistent/path"));
        assert!(report.mutations.is_empty());
        assert!(report.failure.is_none());
    }

    #[test]
    fn links_one_package_and_reports_the_other() {
        let ctx = replay(vec![
            ("is_dir", json!(true)),
            (
                "glob",
                json!({"ok": [
                    "/ws/build/pkg_a/compile_commands.json",
                    "/ws/build/pkg_b/compile_commands.json",
                ]}),
            ),
            (
                "walk_dirs",
                json!({"ok": [
                    {"path": "/ws/src", "subdirs": ["stack"]},
                    {"path": "/ws/src/stack", "subdirs": ["pkg_a"]},
                    {"path": "/ws/src/stack/pkg_a", "subdirs": []},
                ]}),
            ),
            ("exists", json!(true)),
            ("entry_exists", json!(false)),
            ("is_dir", json!(false)),
            ("create_dir", json!({"ok": null})),
            ("symlink", json!({"ok": null})),
        ]);
        let report = probe(&ctx, &settings("/ws"));

        assert!(report.failure.is_none());
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.links().count(), 1);
        assert!(report
            .diagnostics
            .contains(&Diagnostic::Unmatched { packages: vec!["pkg_b".into()] }));
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn mutation_failure_is_kept_in_report() {
        let ctx = replay(vec![
            ("is_dir", json!(true)),
            ("glob", json!({"ok": ["/ws/build/pkg/compile_commands.json"]})),
            ("walk_dirs", json!({"ok": [{"path": "/ws/src", "subdirs": ["pkg"]}]})),
            ("exists", json!(true)),
            ("entry_exists", json!(true)),
            ("remove_file", json!({"err": "Is a directory (os error 21)"})),
        ]);
        let report = probe(&ctx, &settings("/ws"));

        let failure = report.failure.expect("remove should fail");
        assert!(matches!(failure, ProbeError::RemoveEntry { .. }));
        assert!(report.mutations.is_empty());
    }

    #[test]
    fn layout_parses_from_config_strings() {
        assert_eq!("build-dir".parse::<LinkLayout>().unwrap(), LinkLayout::BuildDir);
        assert_eq!(" Package-Root ".parse::<LinkLayout>().unwrap(), LinkLayout::PackageRoot);
        assert!("flat".parse::<LinkLayout>().is_err());
    }
}
