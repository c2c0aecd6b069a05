mod fixed_store;

use tracing::debug;

use clones_core::{PluginError, RepoSnapshot};

pub use fixed_store::FixedSnapshotStore;

use crate::client::GitHubApi;

#[derive(Clone, Debug)]
enum SourceBackend {
    GitHub(GitHubApi),
    Fixed(FixedSnapshotStore),
}

/// Where an invocation gets its [`RepoSnapshot`] from.
#[derive(Clone, Debug)]
pub struct SnapshotSource {
    backend: SourceBackend,
}

impl SnapshotSource {
    pub fn github(api: GitHubApi) -> Self {
        Self {
            backend: SourceBackend::GitHub(api),
        }
    }

    /// Serve a snapshot held in memory, without any network access.
    pub fn fixed(snapshot: RepoSnapshot) -> Self {
        Self {
            backend: SourceBackend::Fixed(FixedSnapshotStore::new(Ok(snapshot))),
        }
    }

    /// Fail every fetch with `error`.
    pub fn failing(error: PluginError) -> Self {
        Self {
            backend: SourceBackend::Fixed(FixedSnapshotStore::new(Err(error))),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            SourceBackend::GitHub(_) => "github",
            SourceBackend::Fixed(_) => "fixed",
        }
    }

    /// Number of fetches served so far. Always `None` for the GitHub backend.
    pub fn fetch_count(&self) -> Option<usize> {
        match &self.backend {
            SourceBackend::GitHub(_) => None,
            SourceBackend::Fixed(store) => Some(store.fetch_count()),
        }
    }

    pub async fn fetch(&self, owner: &str, repo: &str) -> Result<RepoSnapshot, PluginError> {
        debug!(
            owner = %owner,
            repo = %repo,
            backend = self.backend_name(),
            "fetching repository snapshot"
        );

        match &self.backend {
            SourceBackend::GitHub(api) => api.get_repo_clones_and_size(owner, repo).await,
            SourceBackend::Fixed(store) => store.get(owner, repo),
        }
    }
}
