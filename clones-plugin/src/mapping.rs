use serde_json::{Map, Value};
use tracing::debug;

pub const CLONES_KEY: &str = "clones";
pub const SIZE_KEY: &str = "size";

/// Output key names for the two computed fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputMapping {
    pub clones: String,
    pub size: String,
}

impl Default for OutputMapping {
    fn default() -> Self {
        Self {
            clones: CLONES_KEY.to_owned(),
            size: SIZE_KEY.to_owned(),
        }
    }
}

impl OutputMapping {
    /// Build from `{ "clones": "<key>", "size": "<key>" }`. Missing or
    /// non-string entries keep the default key; unknown entries are ignored.
    pub fn from_map(mapping: &Map<String, Value>) -> Self {
        let mut output = Self::default();

        for (from, to) in mapping {
            let Some(to) = to.as_str().map(str::trim).filter(|to| !to.is_empty()) else {
                debug!(key = %from, "ignoring non-string output mapping entry");
                continue;
            };

            match from.as_str() {
                CLONES_KEY => output.clones = to.to_owned(),
                SIZE_KEY => output.size = to.to_owned(),
                other => debug!(key = %other, "ignoring mapping for unknown output"),
            }
        }

        output
    }
}
