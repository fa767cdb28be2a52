//! Replays recorded interactions from a cassette.

use std::collections::{BTreeMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette, serving them in recorded
/// order per method.
pub struct CassetteReplayer {
    queues: BTreeMap<String, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: BTreeMap<String, VecDeque<Interaction>> = BTreeMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry(interaction.method.clone())
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Take the next interaction recorded for `method`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for `method`,
    /// listing the methods that were recorded. A replayed run that makes a
    /// call the recorded run did not has diverged from it.
    pub fn next_interaction(&mut self, method: &str) -> Interaction {
        let Some(queue) = self.queues.get_mut(method) else {
            let available: Vec<&str> = self.queues.keys().map(String::as_str).collect();
            panic!(
                "Cassette exhausted: no fs::{method} calls recorded. \
                 Recorded methods: [{}]",
                available.join(", ")
            );
        };
        queue.pop_front().unwrap_or_else(|| {
            panic!("Cassette exhausted: all recorded fs::{method} calls have been consumed.")
        })
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
