//! Cassette data structures for recording and replaying interactions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::probe::LinkLayout;

/// One recorded `FileSystem` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the run, starting at 0.
    pub seq: u64,
    /// `FileSystem` method that was called.
    pub method: String,
    /// Call arguments. Informational only; replay does not compare them.
    pub input: serde_json::Value,
    /// A boolean for queries, otherwise `{"ok": value}` or `{"err": message}`.
    pub output: serde_json::Value,
}

/// The filesystem calls of one probe run, with the settings it ran under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Workspace root the recorded run probed.
    pub workspace: PathBuf,
    /// Link layout the recorded run used.
    #[serde(default)]
    pub layout: LinkLayout,
    /// Calls in the order they were made.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Cassette for a run with `settings`, stamped with the current time.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        settings: &Settings,
        interactions: Vec<Interaction>,
    ) -> Self {
        Self {
            name: name.into(),
            recorded_at: Utc::now(),
            workspace: settings.root.clone(),
            layout: settings.layout,
            interactions,
        }
    }

    /// Settings to replay this cassette under.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings { root: self.workspace.clone(), layout: self.layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hand_written_cassette() {
        let yaml = r#"
name: hand-written
recorded_at: 2025-03-15T14:30:00Z
workspace: /ws
interactions:
  - seq: 0
    method: glob
    input:
      pattern: /ws/build/*/compile_commands.json
    output:
      ok:
        - /ws/build/pkg/compile_commands.json
"#;
        let cassette: Cassette = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(
            cassette.settings(),
            Settings { root: PathBuf::from("/ws"), layout: LinkLayout::BuildDir }
        );
        assert_eq!(cassette.recorded_at.to_rfc3339(), "2025-03-15T14:30:00+00:00");
        assert_eq!(
            cassette.interactions[0].output,
            json!({"ok": ["/ws/build/pkg/compile_commands.json"]})
        );
    }

    #[test]
    fn layout_is_kept_with_the_workspace() {
        let settings = Settings { root: PathBuf::from("/ws"), layout: LinkLayout::PackageRoot };
        let cassette = Cassette::new("layout", &settings, Vec::new());

        let yaml = serde_yaml::to_string(&cassette).unwrap();
        assert!(yaml.contains("layout: package-root"));
        let parsed: Cassette = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.settings(), settings);
    }
}
