mod manifest;

use std::env;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use clones_core::{PluginMetadata, PluginParams};
use clones_github::{GitHubApi, GitHubSettings, SnapshotSource};
use clones_plugin::{GithubPlugin, OutputMapping, WindowPolicy};

use manifest::{Manifest, load_snapshot};

#[derive(Serialize)]
struct Report<'a> {
    metadata: &'a PluginMetadata,
    outputs: Vec<PluginParams>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file
    dotenvy::dotenv().ok();

    let debug_logging = env_bool("CLONES_LOG_DEBUG", false);
    let max_level = if debug_logging {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter_fn(move |metadata| {
            let target = metadata.target();

            if *metadata.level() > max_level {
                return false;
            }

            !(target.starts_with("hyper_util") || target.starts_with("reqwest::connect"))
        }));

    tracing_subscriber::registry().with(fmt_layer).init();

    let manifest_path = env::args().nth(1);
    let manifest = Manifest::load(manifest_path.as_deref())?;
    info!(inputs = manifest.inputs.len(), "Manifest loaded.");

    let source = match env::var("CLONES_SNAPSHOT_FILE") {
        Ok(path) if !path.trim().is_empty() => {
            let snapshot = load_snapshot(Path::new(path.trim()))?;
            info!(path = %path.trim(), "Using fixed snapshot file; GitHub will not be contacted.");
            SnapshotSource::fixed(snapshot)
        }
        _ => {
            let settings = GitHubSettings::from_env();
            if settings.token.is_none() {
                warn!("GITHUB_TOKEN is not set; fetching repository data will fail.");
            }
            info!(base_url = %settings.base_url, "GitHub API source configured.");
            SnapshotSource::github(GitHubApi::new(settings)?)
        }
    };

    let policy = if env_bool("CLONES_TRUNCATE_WINDOW", false) {
        info!("Windows longer than two weeks will be truncated.");
        WindowPolicy::Truncate
    } else {
        WindowPolicy::Advisory
    };

    let mapping = manifest
        .mapping
        .as_ref()
        .map(OutputMapping::from_map)
        .unwrap_or_default();

    let plugin = GithubPlugin::new(manifest.config, manifest.parameter_metadata, source)
        .with_mapping(mapping)
        .with_window_policy(policy);

    let outputs = plugin
        .execute(&manifest.inputs)
        .await
        .map_err(|err| anyhow::anyhow!("{}: {}", err.host_name(), err))?;
    info!(outputs = outputs.len(), "Plugin execution finished.");

    let report = Report {
        metadata: plugin.metadata(),
        outputs,
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("failed to write outputs")?;
    writeln!(stdout).context("failed to write outputs")?;

    Ok(())
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}
