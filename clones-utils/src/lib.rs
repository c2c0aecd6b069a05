/// Validation message formatting shared by config and input checks.
pub mod formatting;
/// Restricted numeric expression parser for durations.
pub mod parse;
/// Timestamp parsing and local-to-UTC normalization.
pub mod time;
