//! Recording adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{DirListing, FileSystem, FsError};

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    fn recorder(&self) -> MutexGuard<'_, CassetteRecorder> {
        // A panic elsewhere cannot leave a half-pushed interaction behind.
        self.recorder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Inputs are display strings: replay ignores them and they must never fail
// to encode.
fn path_input(path: &Path) -> Value {
    json!({ "path": path.display().to_string() })
}

impl FileSystem for RecordingFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        let answer = self.inner.is_dir(path);
        self.recorder().record_query("is_dir", path_input(path), answer);
        answer
    }

    fn exists(&self, path: &Path) -> bool {
        let answer = self.inner.exists(path);
        self.recorder().record_query("exists", path_input(path), answer);
        answer
    }

    fn entry_exists(&self, path: &Path) -> bool {
        let answer = self.inner.entry_exists(path);
        self.recorder().record_query("entry_exists", path_input(path), answer);
        answer
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, FsError> {
        let result = self.inner.glob(pattern);
        self.recorder().record_outcome("glob", json!({ "pattern": pattern }), &result);
        result
    }

    fn walk_dirs(&self, root: &Path) -> Result<Vec<DirListing>, FsError> {
        let result = self.inner.walk_dirs(root);
        self.recorder().record_outcome("walk_dirs", path_input(root), &result);
        result
    }

    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        let result = self.inner.create_dir(path);
        self.recorder().record_outcome("create_dir", path_input(path), &result);
        result
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let result = self.inner.remove_file(path);
        self.recorder().record_outcome("remove_file", path_input(path), &result);
        result
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        let result = self.inner.symlink(target, link);
        let input = json!({
            "target": target.display().to_string(),
            "link": link.display().to_string(),
        });
        self.recorder().record_outcome("symlink", input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::cassette::format::Cassette;
    use crate::config::Settings;
    use crate::probe::LinkLayout;

    #[test]
    fn records_queries_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("fs.cassette.yaml");
        let settings = Settings { root: dir.path().to_path_buf(), layout: LinkLayout::BuildDir };

        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", &settings)));

        {
            let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
            assert!(fs.is_dir(dir.path()));
            assert!(fs.remove_file(&dir.path().join("missing")).is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        let cassette: Cassette = serde_yaml::from_str(&content).unwrap();
        assert_eq!(cassette.workspace, dir.path());
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].method, "is_dir");
        assert_eq!(
            cassette.interactions[0].input,
            json!({"path": dir.path().display().to_string()})
        );
        assert_eq!(cassette.interactions[0].output, json!(true));
        assert_eq!(cassette.interactions[1].method, "remove_file");
        assert!(cassette.interactions[1].output.get("err").is_some());
    }
}
