use serde::Deserialize;

use clones_core::CloneEvent;

/// Body of `GET repos/{owner}/{repo}/traffic/clones`.
#[derive(Debug, Deserialize)]
pub(crate) struct ClonesResponse {
    #[serde(default)]
    pub clones: Vec<CloneEvent>,
}

/// Body of `GET repos/{owner}/{repo}`; `size` is reported in kilobytes.
#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryResponse {
    pub size: f64,
}
