use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use serde_json::{Map, Value};

use clones_core::{ConfigParams, PluginParametersMetadata, PluginParams, RepoSnapshot};

/// One plugin invocation as handed over by the host.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    #[serde(default)]
    pub config: Option<ConfigParams>,
    pub inputs: Vec<PluginParams>,
    #[serde(default)]
    pub mapping: Option<Map<String, Value>>,
    #[serde(default)]
    pub parameter_metadata: Option<PluginParametersMetadata>,
}

impl Manifest {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("failed to parse manifest JSON")
    }

    /// Read from `path`, or from stdin when `path` is `None` or `-`.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let raw = match path {
            Some(path) if path != "-" => fs::read_to_string(path)
                .with_context(|| format!("failed to read manifest `{}`", path))?,
            _ => {
                let mut raw = String::new();
                io::stdin()
                    .read_to_string(&mut raw)
                    .context("failed to read manifest from stdin")?;
                raw
            }
        };

        Self::from_json(&raw)
    }
}

/// Load a snapshot file for offline runs.
pub fn load_snapshot(path: &Path) -> anyhow::Result<RepoSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot file `{}`", path.display()))
}
