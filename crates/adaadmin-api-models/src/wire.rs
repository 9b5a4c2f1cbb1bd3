//! Lenient decoders for loosely typed wire values.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a string, number, boolean or null into text.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}
