use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptor for one declared input or output parameter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    #[serde(
        rename = "aggregation-method",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub aggregation_method: Option<Value>,
}

impl ParameterMetadata {
    pub fn new(description: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            unit: unit.into(),
            aggregation_method: None,
        }
    }
}

pub type ParameterMetadataMap = BTreeMap<String, ParameterMetadata>;

/// Parameter metadata handed to the plugin by the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginParametersMetadata {
    #[serde(default)]
    pub inputs: Option<ParameterMetadataMap>,
    #[serde(default)]
    pub outputs: Option<ParameterMetadataMap>,
}

/// Metadata block the plugin exposes to the host.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PluginMetadata {
    pub kind: &'static str,
    pub inputs: ParameterMetadataMap,
    pub outputs: ParameterMetadataMap,
}
