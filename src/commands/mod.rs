//! Command dispatch and handlers.

pub mod link;

use std::env;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Cli;
use crate::config::{Settings, RECORD_ENV};
use crate::context::ServiceContext;

/// Dispatch parsed arguments to the link command.
///
/// When `COMPDB_LINK_RECORD` is set to a directory path, every filesystem
/// interaction is recorded to a cassette in a new session directory there.
///
/// # Errors
///
/// Returns an error string if settings cannot be resolved, recording cannot
/// be set up, or a filesystem mutation fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let settings = Settings::resolve(cli)?;

    let (ctx, session) = match env::var_os(RECORD_ENV) {
        Some(dir) if !dir.is_empty() => {
            let (ctx, session) = ServiceContext::recording_at(PathBuf::from(dir), &settings)?;
            (ctx, Some(session))
        }
        _ => (ServiceContext::live(), None),
    };

    let result = link::run_with_context(&ctx, &settings);

    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
