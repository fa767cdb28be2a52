//! Recording session owning the cassette recorder for one run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::config::Settings;

/// File name of the filesystem cassette inside a session directory.
pub const FS_CASSETTE: &str = "fs.cassette.yaml";

/// Manages the filesystem `CassetteRecorder` for a recording session.
///
/// Cassettes are stored in a timestamped directory under the base directory
/// given at construction.
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing the cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session at `<base>/<timestamp>/` for a run
    /// under `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session directory already exists
    /// - The directory cannot be created
    pub fn new(base: &Path, settings: &Settings) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let recorder = CassetteRecorder::new(
            output_dir.join(FS_CASSETTE),
            format!("{timestamp}-fs"),
            settings,
        );

        Ok(Self { fs: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish the recorder and write the cassette file to disk.
    ///
    /// All adapters holding the recorder must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.fs)
            .map_err(|_| "Recording adapter for fs still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock for fs poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write fs cassette: {e}"))?;
        Ok(self.output_dir)
    }
}
