//! Step 4: create or refresh the links into the source tree.

use super::reconcile::Match;
use super::{Diagnostic, LinkLayout, Mutation, ProbeError};
use crate::context::ServiceContext;

/// Links every match in order, stopping at the first mutation failure.
///
/// Diagnostics and mutations are appended as they happen, so on failure they
/// describe exactly what was done before the error.
///
/// # Errors
///
/// Returns the first `ProbeError` raised by a removal, directory creation or
/// link creation.
pub fn apply(
    ctx: &ServiceContext,
    matches: &[Match],
    layout: LinkLayout,
    diagnostics: &mut Vec<Diagnostic>,
    mutations: &mut Vec<Mutation>,
) -> Result<(), ProbeError> {
    for m in matches {
        link_one(ctx, m, layout, diagnostics, mutations)?;
    }
    Ok(())
}

fn link_one(
    ctx: &ServiceContext,
    m: &Match,
    layout: LinkLayout,
    diagnostics: &mut Vec<Diagnostic>,
    mutations: &mut Vec<Mutation>,
) -> Result<(), ProbeError> {
    let package = m.package.clone();

    if ctx.fs.entry_exists(&m.link) {
        diagnostics.push(Diagnostic::LinkPresent { package: package.clone() });
        ctx.fs.remove_file(&m.link).map_err(|source| ProbeError::RemoveEntry {
            package: package.clone(),
            path: m.link.clone(),
            source,
        })?;
        mutations.push(Mutation::RemovedEntry { path: m.link.clone() });
    } else {
        diagnostics.push(Diagnostic::LinkMissing { package: package.clone() });
        if let Some(build_dir) = layout.build_dir(&m.source_dir) {
            if ctx.fs.is_dir(&build_dir) {
                diagnostics
                    .push(Diagnostic::ReusingBuildDir { package: package.clone(), path: build_dir });
            } else {
                diagnostics.push(Diagnostic::CreatingBuildDir {
                    package: package.clone(),
                    path: build_dir.clone(),
                });
                ctx.fs.create_dir(&build_dir).map_err(|source| ProbeError::CreateDir {
                    package: package.clone(),
                    path: build_dir.clone(),
                    source,
                })?;
                mutations.push(Mutation::CreatedDir { path: build_dir });
            }
        }
    }

    ctx.fs.symlink(&m.artifact, &m.link).map_err(|source| ProbeError::Link {
        package: package.clone(),
        link: m.link.clone(),
        target: m.artifact.clone(),
        source,
    })?;
    tracing::info!(%package, link = %m.link.display(), "linked compile commands");
    mutations.push(Mutation::CreatedLink {
        package,
        link: m.link.clone(),
        target: m.artifact.clone(),
    });
    Ok(())
}
