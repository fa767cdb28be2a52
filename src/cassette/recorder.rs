//! Collects the filesystem calls of one probe run into a cassette file.

use std::fmt::Display;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};

use super::format::{Cassette, Interaction};
use crate::config::Settings;

/// Accumulates filesystem calls in order and writes them as YAML on finish.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    settings: Settings,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Recorder for a run under `settings`, writing to `path` on finish.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, settings: &Settings) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            settings: settings.clone(),
            interactions: Vec::new(),
        }
    }

    /// Records a yes/no query such as `is_dir`.
    pub fn record_query(&mut self, method: &str, input: Value, answer: bool) {
        self.push(method, input, Value::Bool(answer));
    }

    /// Records a fallible call as `{"ok": value}` or `{"err": message}`.
    ///
    /// A value that cannot be encoded (a non UTF-8 path) is recorded as an
    /// error so the replayed run still sees the call fail at the same point.
    pub fn record_outcome<T, E>(&mut self, method: &str, input: Value, result: &Result<T, E>)
    where
        T: Serialize,
        E: Display,
    {
        let output = match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(value) => json!({ "ok": value }),
                Err(err) => {
                    tracing::warn!(method, %err, "cannot encode result for the cassette");
                    json!({ "err": format!("unrecordable {method} result: {err}") })
                }
            },
            Err(err) => json!({ "err": err.to_string() }),
        };
        self.push(method, input, output);
    }

    fn push(&mut self, method: &str, input: Value, output: Value) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction { seq, method: method.to_string(), input, output });
    }

    /// Writes the cassette YAML file and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette::new(self.name, &self.settings, self.interactions);
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
