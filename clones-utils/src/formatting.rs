use serde_json::Value;

/// One step in the path to an offending field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// Join path segments with `.`, rendering indices as `[n]` (e.g. `inputs.[0].x`).
pub fn flatten_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => format!("[{}]", index),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Render a field-level issue. Downstream consumers parse this exact shape:
/// `"<path>" parameter is <reason>[ at index <n>]. Error code: <code>.`
pub fn format_field_issue(
    path: &[PathSegment],
    message: &str,
    code: &str,
    index: Option<usize>,
) -> String {
    let full_path = flatten_path(path);
    if full_path.is_empty() {
        return message.to_owned();
    }

    let index_suffix = index
        .map(|index| format!(" at index {}", index))
        .unwrap_or_default();

    format!(
        "\"{}\" parameter is {}{}. Error code: {}.",
        full_path,
        message.to_lowercase(),
        index_suffix,
        code
    )
}

/// Type name used in `Expected <a>, received <b>` reasons.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
