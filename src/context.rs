//! Service context bundling the port trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::filesystem::FileSystem;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Filesystem for workspace discovery and link maintenance.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context backed by the real filesystem.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem) }
    }

    /// Creates a recording context that uses the live filesystem and records
    /// every interaction of a run under `settings` into a new session under
    /// `base`.
    ///
    /// The context must be dropped before `RecordingSession::finish` is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        base: PathBuf,
        settings: &Settings,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(&base, settings)?;
        let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs));
        Ok((Self { fs: Box::new(fs) }, session))
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::replaying_cassette(&cassette))
    }

    /// Creates a replaying context from an in-memory cassette.
    #[must_use]
    pub fn replaying_cassette(cassette: &Cassette) -> Self {
        Self { fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))) }
    }
}
