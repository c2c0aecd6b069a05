use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clones_core::{PluginError, RepoSnapshot};

/// In-memory snapshot shared by every clone of the owning source.
#[derive(Clone, Debug)]
pub struct FixedSnapshotStore {
    outcome: Arc<Result<RepoSnapshot, PluginError>>,
    fetches: Arc<AtomicUsize>,
}

impl FixedSnapshotStore {
    pub fn new(outcome: Result<RepoSnapshot, PluginError>) -> Self {
        Self {
            outcome: Arc::new(outcome),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn get(&self, _owner: &str, _repo: &str) -> Result<RepoSnapshot, PluginError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.outcome.as_ref().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}
