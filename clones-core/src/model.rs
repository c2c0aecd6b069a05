use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single input or output record. Unknown keys pass through untouched.
pub type PluginParams = Map<String, Value>;

/// Raw global configuration as supplied by the host.
pub type ConfigParams = Map<String, Value>;

/// Validated global configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalConfig {
    pub repo: String,
}

impl GlobalConfig {
    /// Split `owner/name` into its two segments. Validation guarantees a
    /// single `/`; a value without one yields an empty name.
    pub fn owner_and_name(&self) -> (&str, &str) {
        self.repo
            .split_once('/')
            .unwrap_or((self.repo.as_str(), ""))
    }
}

/// One bucket of clone activity reported by the remote source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneEvent {
    pub timestamp: String,
    pub count: u64,
    #[serde(default)]
    pub uniques: u64,
}

impl CloneEvent {
    pub fn at(timestamp: DateTime<Utc>, count: u64) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            count,
            uniques: 0,
        }
    }
}

/// Clone events plus repository size in GB, fetched once per invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub clones: Vec<CloneEvent>,
    pub size: f64,
}

/// Build an input record from a typed timestamp and a duration in seconds.
pub fn input_record(timestamp: DateTime<Utc>, duration_seconds: f64) -> PluginParams {
    let mut record = PluginParams::new();
    record.insert(
        "timestamp".to_owned(),
        Value::String(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    record.insert("duration".to_owned(), Value::from(duration_seconds));
    record
}
