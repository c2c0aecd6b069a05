pub mod client;
mod errors;
mod response;
pub mod settings;
pub mod source;

pub use client::GitHubApi;
pub use settings::GitHubSettings;
pub use source::SnapshotSource;
