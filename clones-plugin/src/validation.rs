use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use clones_core::{ConfigParams, GlobalConfig, PluginError, PluginParams};
use clones_utils::formatting::{PathSegment, format_field_issue, json_type_name};
use clones_utils::parse::parse_numeric_expression;

static REPO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+/[A-Za-z0-9._-]+$").expect("repo pattern compiles")
});

/// Machine-readable issue codes carried in validation messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueCode {
    InvalidType,
    InvalidString,
    InvalidUnion,
    InvalidDate,
    Custom,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::InvalidString => "invalid_string",
            Self::InvalidUnion => "invalid_union",
            Self::InvalidDate => "invalid_date",
            Self::Custom => "custom",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: Vec<PathSegment>,
    pub message: String,
    pub code: IssueCode,
}

impl ValidationIssue {
    pub fn new(field: &str, message: impl Into<String>, code: IssueCode) -> Self {
        Self {
            path: vec![PathSegment::from(field)],
            message: message.into(),
            code,
        }
    }

    pub fn render(&self, index: Option<usize>) -> String {
        format_field_issue(&self.path, &self.message, self.code.as_str(), index)
    }
}

/// Join rendered issues the way the host prints an array of messages.
pub fn render_issues(issues: &[ValidationIssue], index: Option<usize>) -> String {
    issues
        .iter()
        .map(|issue| issue.render(index))
        .collect::<Vec<_>>()
        .join(",")
}

/// Duration as supplied on an input record, with its resolved value in seconds.
#[derive(Clone, Debug, PartialEq)]
pub enum DurationInput {
    Seconds(f64),
    Expression { source: String, seconds: f64 },
}

impl DurationInput {
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Seconds(seconds) => *seconds,
            Self::Expression { seconds, .. } => *seconds,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Seconds(seconds) => Value::from(*seconds),
            Self::Expression { source, .. } => Value::String(source.clone()),
        }
    }
}

/// The fields of an input record the aggregator relies on.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedInput {
    pub timestamp: String,
    pub duration: DurationInput,
}

impl ValidatedInput {
    /// Copy of `input` with the validated fields written back. Every other
    /// key is kept as is.
    pub fn merged_with(&self, input: &PluginParams) -> PluginParams {
        let mut merged = input.clone();
        merged.insert(
            "timestamp".to_owned(),
            Value::String(self.timestamp.clone()),
        );
        if !matches!(input.get("duration"), Some(Value::Number(_))) {
            merged.insert("duration".to_owned(), self.duration.to_value());
        }
        merged
    }
}

/// Check the global config: it must exist, be non-empty and carry an
/// `owner/name` repository identifier.
pub fn validate_global_config(config: Option<&ConfigParams>) -> Result<GlobalConfig, PluginError> {
    let Some(config) = config.filter(|config| !config.is_empty()) else {
        return Err(PluginError::ConfigMissing(
            "Global config is not provided.".to_owned(),
        ));
    };

    let issue = match config.get("repo") {
        Some(Value::String(repo)) if REPO_PATTERN.is_match(repo) => {
            return Ok(GlobalConfig { repo: repo.clone() });
        }
        Some(Value::String(_)) => ValidationIssue::new("repo", "Invalid", IssueCode::InvalidString),
        Some(other) => ValidationIssue::new(
            "repo",
            format!("Expected string, received {}", json_type_name(other)),
            IssueCode::InvalidType,
        ),
        None => ValidationIssue::new("repo", "Required", IssueCode::InvalidType),
    };

    Err(PluginError::ConfigInvalid(issue.render(None)))
}

/// Check one input record. `index` is the record's 0-based position and is
/// named in the error message.
pub fn validate_input(input: &PluginParams, index: usize) -> Result<ValidatedInput, PluginError> {
    let mut issues = Vec::new();

    let timestamp = match input.get("timestamp") {
        Some(Value::String(timestamp)) => Some(timestamp.clone()),
        Some(other) => {
            issues.push(ValidationIssue::new(
                "timestamp",
                format!("Expected string, received {}", json_type_name(other)),
                IssueCode::InvalidUnion,
            ));
            None
        }
        None => {
            issues.push(ValidationIssue::new(
                "timestamp",
                "Required",
                IssueCode::InvalidUnion,
            ));
            None
        }
    };

    let duration = match input.get("duration") {
        Some(Value::Number(number)) => number.as_f64().map(DurationInput::Seconds),
        Some(Value::String(source)) => match parse_numeric_expression(source) {
            Some(seconds) => Some(DurationInput::Expression {
                source: source.clone(),
                seconds,
            }),
            None => {
                issues.push(ValidationIssue::new(
                    "duration",
                    "Not a valid numeric expression",
                    IssueCode::Custom,
                ));
                None
            }
        },
        Some(other) => {
            issues.push(ValidationIssue::new(
                "duration",
                format!("Expected number, received {}", json_type_name(other)),
                IssueCode::InvalidUnion,
            ));
            None
        }
        None => {
            issues.push(ValidationIssue::new(
                "duration",
                "Required",
                IssueCode::InvalidUnion,
            ));
            None
        }
    };

    match (timestamp, duration) {
        (Some(timestamp), Some(duration)) if issues.is_empty() => {
            Ok(ValidatedInput { timestamp, duration })
        }
        _ => Err(PluginError::InputInvalid(render_issues(&issues, Some(index)))),
    }
}
