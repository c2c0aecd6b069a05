use serde_json::Value;
use tracing::{debug, info};

use clones_core::{
    CloneEvent, ConfigParams, PluginError, PluginMetadata, PluginParametersMetadata, PluginParams,
};
use clones_github::SnapshotSource;
use clones_utils::time::LocalZone;

use crate::aggregate::{WindowAggregator, WindowPolicy};
use crate::mapping::OutputMapping;
use crate::metadata::plugin_metadata;
use crate::validation::{ValidatedInput, validate_global_config, validate_input};

/// Annotates input records with GitHub clone counts and repository size.
#[derive(Clone, Debug)]
pub struct GithubPlugin {
    global_config: Option<ConfigParams>,
    metadata: PluginMetadata,
    mapping: OutputMapping,
    source: SnapshotSource,
    aggregator: WindowAggregator,
}

impl GithubPlugin {
    pub fn new(
        global_config: Option<ConfigParams>,
        parameters_metadata: Option<PluginParametersMetadata>,
        source: SnapshotSource,
    ) -> Self {
        Self {
            global_config,
            metadata: plugin_metadata(parameters_metadata),
            mapping: OutputMapping::default(),
            source,
            aggregator: WindowAggregator::default(),
        }
    }

    pub fn with_mapping(mut self, mapping: OutputMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_local_zone(mut self, zone: LocalZone) -> Self {
        self.aggregator = WindowAggregator::new(zone, self.aggregator.policy());
        self
    }

    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.aggregator = WindowAggregator::new(self.aggregator.zone(), policy);
        self
    }

    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    /// Validate config and inputs, fetch the repository snapshot once, then
    /// map every input to an output record in the same order.
    ///
    /// Any failure aborts the whole call; there are no partial results.
    pub async fn execute(&self, inputs: &[PluginParams]) -> Result<Vec<PluginParams>, PluginError> {
        let config = validate_global_config(self.global_config.as_ref())?;
        let validated = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| validate_input(input, index))
            .collect::<Result<Vec<_>, _>>()?;

        let (owner, repo) = config.owner_and_name();
        let snapshot = self.source.fetch(owner, repo).await?;
        info!(
            owner = %owner,
            repo = %repo,
            inputs = inputs.len(),
            clone_events = snapshot.clones.len(),
            size_gb = snapshot.size,
            "Repository snapshot ready."
        );

        inputs
            .iter()
            .zip(&validated)
            .enumerate()
            .map(|(index, (input, validated))| {
                self.annotate(index, input, validated, &snapshot.clones, snapshot.size)
            })
            .collect()
    }

    fn annotate(
        &self,
        index: usize,
        input: &PluginParams,
        validated: &ValidatedInput,
        clones: &[CloneEvent],
        size: f64,
    ) -> Result<PluginParams, PluginError> {
        let tally = self
            .aggregator
            .clones_for_time_range(validated, clones, index)?;
        debug!(
            index,
            clones = tally.clones,
            window_start_ms = tally.window.start_ms,
            window_end_ms = tally.window.end_ms,
            "aggregated clone window"
        );

        let mut output = validated.merged_with(input);
        output.insert(self.mapping.clones.clone(), Value::from(tally.clones));
        output.insert(self.mapping.size.clone(), Value::from(size));
        Ok(output)
    }
}
