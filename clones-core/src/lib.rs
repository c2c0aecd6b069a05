pub mod error;
pub mod metadata;
pub mod model;

pub use error::{ErrorKind, PluginError};
pub use metadata::{ParameterMetadata, ParameterMetadataMap, PluginMetadata, PluginParametersMetadata};
pub use model::{CloneEvent, ConfigParams, GlobalConfig, PluginParams, RepoSnapshot, input_record};

pub type Result<T, E = PluginError> = std::result::Result<T, E>;
