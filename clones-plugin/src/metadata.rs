use clones_core::{
    ParameterMetadata, ParameterMetadataMap, PluginMetadata, PluginParametersMetadata,
};

use crate::mapping::{CLONES_KEY, SIZE_KEY};

pub fn default_outputs() -> ParameterMetadataMap {
    ParameterMetadataMap::from([
        (
            CLONES_KEY.to_owned(),
            ParameterMetadata::new(
                "the clones count of the given repository in the specified time range",
                "number",
            ),
        ),
        (
            SIZE_KEY.to_owned(),
            ParameterMetadata::new("the size of the given repository", "GB"),
        ),
    ])
}

/// Host-supplied parameter metadata passes through; outputs fall back to the
/// `clones`/`size` descriptors.
pub fn plugin_metadata(parameters: Option<PluginParametersMetadata>) -> PluginMetadata {
    let parameters = parameters.unwrap_or_default();

    PluginMetadata {
        kind: "execute",
        inputs: parameters.inputs.unwrap_or_default(),
        outputs: parameters.outputs.unwrap_or_else(default_outputs),
    }
}
