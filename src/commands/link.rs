//! The link command: probe the workspace and print what happened.

use std::fmt::Write as _;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::probe::{self, ProbeReport};

/// Run the prober with the given context and print its report to stdout.
///
/// # Errors
///
/// Returns an error string if a filesystem mutation failed.
pub fn run_with_context(ctx: &ServiceContext, settings: &Settings) -> Result<(), String> {
    tracing::info!(root = %settings.root.display(), layout = ?settings.layout, "probing workspace");
    let report = probe::probe(ctx, settings);
    print!("{}", render(&report));
    match report.failure {
        Some(err) => Err(err.to_string()),
        None => Ok(()),
    }
}

/// Formats diagnostics in the order they occurred, then one line per link.
#[must_use]
pub fn render(report: &ProbeReport) -> String {
    let mut out = String::new();
    for diagnostic in &report.diagnostics {
        let _ = writeln!(out, "{diagnostic}");
    }
    for link in report.links() {
        let _ = writeln!(out, "{link}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{Diagnostic, LinkLayout, Mutation};
    use std::path::PathBuf;

    #[test]
    fn render_lists_diagnostics_then_links() {
        let report = ProbeReport {
            root: PathBuf::from("/ws"),
            diagnostics: vec![Diagnostic::LinkMissing { package: "pkg".into() }],
            mutations: vec![
                Mutation::CreatedDir { path: PathBuf::from("/ws/src/pkg/build") },
                Mutation::CreatedLink {
                    package: "pkg".into(),
                    link: PathBuf::from("/ws/src/pkg/build/compile_commands.json"),
                    target: PathBuf::from("/ws/build/pkg/compile_commands.json"),
                },
            ],
            ..ProbeReport::default()
        };
        let text = render(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "missing compile_commands.json for pkg");
        assert!(lines[1].starts_with("linked pkg: "));
    }

    #[test]
    fn missing_root_is_not_an_error() {
        let settings = Settings {
            root: PathBuf::from("/nonexistent/compdb-link/root"),
            layout: LinkLayout::BuildDir,
        };
        assert!(run_with_context(&ServiceContext::live(), &settings).is_ok());
    }
}
