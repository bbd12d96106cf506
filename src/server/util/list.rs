//! Parsing for registration list columns.
//!
//! Interest and field-of-study columns have been written by several versions of the
//! registration site: as JSON arrays, as JSON arrays encoded into a string, and as plain
//! comma-separated strings. [`parse_list_field`] accepts all three, in that order.

use serde_json::Value;

/// Parses a stored list column into its string entries.
///
/// Attempts, in order:
/// 1. Native JSON array: string items are taken as-is, numbers and booleans are
///    stringified, nested values and nulls are dropped.
/// 2. String holding a JSON array, e.g. `"[\"AI\",\"Robotics\"]"`.
/// 3. Comma-separated string, e.g. `"AI, Robotics"`.
///
/// Entries are trimmed and empty entries dropped. Normalization to role names is left to
/// the caller.
///
/// # Arguments
/// - `value` - Column value, `None` when the column is NULL
///
/// # Returns
/// - `Vec<String>` - Parsed entries in stored order (empty for NULL or empty input)
pub fn parse_list_field(value: Option<&Value>) -> Vec<String> {
    let entries = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(raw)) => parse_list_string(raw),
        Some(other) => scalar_to_string(other).into_iter().collect(),
    };

    entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn parse_list_string(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();

    if trimmed.starts_with('[') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return items.iter().filter_map(scalar_to_string).collect();
        }
    }

    trimmed.split(',').map(str::to_string).collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn native_array_passes_through() {
        let value = json!(["AI", " Robotics ", ""]);
        assert_eq!(parse_list_field(Some(&value)), vec!["AI", "Robotics"]);
    }

    #[test]
    fn json_encoded_string_is_decoded() {
        let value = json!("[\"AI\", \"Space Systems\"]");
        assert_eq!(parse_list_field(Some(&value)), vec!["AI", "Space Systems"]);
    }

    #[test]
    fn comma_separated_string_is_split() {
        let value = json!("AI, Robotics,,Drones ");
        assert_eq!(parse_list_field(Some(&value)), vec!["AI", "Robotics", "Drones"]);
    }

    #[test]
    fn malformed_json_falls_back_to_comma_split() {
        let value = json!("[AI, Robotics");
        assert_eq!(parse_list_field(Some(&value)), vec!["[AI", "Robotics"]);
    }

    #[test]
    fn null_and_missing_are_empty() {
        assert!(parse_list_field(None).is_empty());
        assert!(parse_list_field(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn nested_values_are_dropped() {
        let value = json!(["AI", {"name": "x"}, 3, null]);
        assert_eq!(parse_list_field(Some(&value)), vec!["AI", "3"]);
    }
}
