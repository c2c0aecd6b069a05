pub mod aggregate;
pub mod mapping;
pub mod metadata;
pub mod plugin;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use aggregate::{TWO_WEEKS_MS, TWO_WEEKS_WARNING, WindowAggregator, WindowPolicy};
pub use mapping::OutputMapping;
pub use plugin::GithubPlugin;
pub use validation::{validate_global_config, validate_input};
