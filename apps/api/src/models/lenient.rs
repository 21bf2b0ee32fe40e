//! Forgiving decoders for fields that come from model output or loosely
//! shaped client JSON.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through; numbers and booleans are rendered. Everything else
/// (null, arrays, objects) has no scalar form.
pub fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A list keeps its scalar items, a lone scalar becomes a one-element list
/// and null becomes empty.
pub fn list_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(render_scalar).collect(),
        other => render_scalar(other).into_iter().collect(),
    }
}

pub fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(list_from_value(&value))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(render_scalar(&value).unwrap_or_default())
}
