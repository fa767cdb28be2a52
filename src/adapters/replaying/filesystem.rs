//! Replaying adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{DirListing, FileSystem, FsError};

/// Replays recorded filesystem operations from a cassette.
///
/// Inputs are not compared against the recording; outputs are served in
/// order per method.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction(method).output
    }

    fn next_bool(&self, method: &str) -> bool {
        self.next_output(method)
            .as_bool()
            .unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
fn extract_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, FsError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

impl FileSystem for ReplayingFileSystem {
    fn is_dir(&self, _path: &Path) -> bool {
        self.next_bool("is_dir")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.next_bool("exists")
    }

    fn entry_exists(&self, _path: &Path) -> bool {
        self.next_bool("entry_exists")
    }

    fn glob(&self, _pattern: &str) -> Result<Vec<PathBuf>, FsError> {
        extract_result(&self.next_output("glob"), "fs::glob")
    }

    fn walk_dirs(&self, _root: &Path) -> Result<Vec<DirListing>, FsError> {
        extract_result(&self.next_output("walk_dirs"), "fs::walk_dirs")
    }

    fn create_dir(&self, _path: &Path) -> Result<(), FsError> {
        extract_result(&self.next_output("create_dir"), "fs::create_dir")
    }

    fn remove_file(&self, _path: &Path) -> Result<(), FsError> {
        extract_result(&self.next_output("remove_file"), "fs::remove_file")
    }

    fn symlink(&self, _target: &Path, _link: &Path) -> Result<(), FsError> {
        extract_result(&self.next_output("symlink"), "fs::symlink")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::config::Settings;
    use crate::probe::LinkLayout;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let settings = Settings { root: PathBuf::from("/ws"), layout: LinkLayout::BuildDir };
        CassetteReplayer::new(&Cassette::new("test", &settings, interactions))
    }

    fn fs_interaction(seq: u64, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, method: method.into(), input: json!({}), output }
    }

    #[test]
    fn replays_walk_listings() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![fs_interaction(
            0,
            "walk_dirs",
            json!({"ok": [{"path": "/ws/src", "subdirs": ["pkg"]}]}),
        )]));
        let listings = fs.walk_dirs(Path::new("/ws/src")).unwrap();
        assert_eq!(
            listings,
            vec![DirListing { path: PathBuf::from("/ws/src"), subdirs: vec!["pkg".into()] }]
        );
    }

    #[test]
    fn replays_unit_results() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![fs_interaction(
            0,
            "create_dir",
            json!({"ok": null}),
        )]));
        assert!(fs.create_dir(Path::new("/ws/src/pkg/build")).is_ok());
    }

    #[test]
    fn replays_recorded_errors() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![fs_interaction(
            0,
            "symlink",
            json!({"err": "Permission denied (os error 13)"}),
        )]));
        let err = fs.symlink(Path::new("/a"), Path::new("/b")).unwrap_err();
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn replays_booleans() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![
            fs_interaction(0, "is_dir", json!(true)),
            fs_interaction(1, "entry_exists", json!(false)),
        ]));
        assert!(fs.is_dir(Path::new("/ws")));
        assert!(!fs.entry_exists(Path::new("/ws/link")));
    }
}
