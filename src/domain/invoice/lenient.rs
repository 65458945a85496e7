//! Tolerant field decoders for records written by older clients, which stored
//! numbers where text was expected and `null` for untouched inputs.

use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

fn text_of(value: Value) -> Result<Option<String>, String> {
  match value {
    Value::Null => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Number(n) => Ok(Some(n.to_string())),
    Value::Bool(b) => Ok(Some(b.to_string())),
    other => Err(format!("expected text, found {}", other)),
  }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  text_of(value)
    .map(Option::unwrap_or_default)
    .map_err(D::Error::custom)
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  text_of(value).map_err(D::Error::custom)
}

pub(crate) fn optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(deserializer)? {
    Value::Null => Ok(None),
    Value::Number(n) => n
      .as_u64()
      .map(Some)
      .ok_or_else(|| D::Error::custom(format!("expected unsigned integer, found {}", n))),
    Value::String(s) if s.trim().is_empty() => Ok(None),
    Value::String(s) => s.trim().parse().map(Some).map_err(D::Error::custom),
    other => Err(D::Error::custom(format!("expected number, found {}", other))),
  }
}
