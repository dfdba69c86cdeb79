use indexmap::IndexSet;
use moltdigest_core::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};


/// Most recent insertions kept across runs.
pub const MAX_SEEN_IDS: usize = 800;

/// Post identifiers already surfaced, oldest first, plus the last-run
/// timestamp. Insertion order is tracked explicitly so the cap can evict
/// the oldest entries rather than arbitrary ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeenState {
    seen_ids: IndexSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_run_at: Option<String>,
}

impl SeenState {
    pub fn contains(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen_ids.is_empty()
    }

    /// Record one id as surfaced. Re-recording moves the id to the most
    /// recent position, so posts that stay in the feed do not age out of
    /// the window while still live.
    pub fn record(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id.is_empty() {
            return;
        }
        self.seen_ids.shift_remove(&id);
        self.seen_ids.insert(id);
    }

    /// Record a whole run's fetched ids, then trim to the cap.
    pub fn record_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.record(id);
        }
        self.enforce_cap();
    }

    fn enforce_cap(&mut self) {
        if self.seen_ids.len() > MAX_SEEN_IDS {
            let excess = self.seen_ids.len() - MAX_SEEN_IDS;
            self.seen_ids = self.seen_ids.split_off(excess);
        }
    }

    pub fn set_last_run(&mut self, timestamp: impl Into<String>) {
        self.last_run_at = Some(timestamp.into());
    }

    pub fn last_run_at(&self) -> Option<&str> {
        self.last_run_at.as_deref()
    }

    /// Snapshot of the ids for membership checks during selection.
    pub fn id_snapshot(&self) -> HashSet<String> {
        self.seen_ids.iter().cloned().collect()
    }
}

/// Loads and saves [`SeenState`] at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read state from disk. An absent or unparseable file yields an empty
    /// state: corruption loses history but never fails a run.
    pub fn load(&self) -> SeenState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("No state file at {}, starting fresh", self.path.display());
                return SeenState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    "State file {} is unreadable ({}), treating as empty",
                    self.path.display(),
                    e
                );
                SeenState::default()
            }
        }
    }

    /// Write state back as pretty-printed JSON, creating parent directories
    /// as needed.
    pub fn save(&self, state: &SeenState) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut raw = serde_json::to_string_pretty(state)?;
        raw.push('\n');
        std::fs::write(&self.path, raw)?;
        debug!("Saved {} seen ids to {}", state.len(), self.path.display());
        Ok(())
    }
}
