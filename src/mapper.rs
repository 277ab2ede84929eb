//! Turning parsed model JSON into typed results.
//!
//! Field assignment is plain serde: key names must match, missing required keys
//! fail. The one normalization applied is for fields that must be a plain
//! string but sometimes come back from the model as a nested object.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::GenerationError;

/// Build a typed result from a parsed JSON value.
pub fn map_value<T: DeserializeOwned>(value: Value) -> Result<T, GenerationError> {
  serde_json::from_value(value).map_err(GenerationError::Mapping)
}

/// `{"a": "x", "b": "y"}` → `"a: x | b: y"`, keeping the object's key order.
pub fn flatten_mapping(map: &Map<String, Value>) -> String {
  map
    .iter()
    .map(|(k, v)| match v {
      Value::String(s) => format!("{k}: {s}"),
      other => format!("{k}: {other}"),
    })
    .collect::<Vec<_>>()
    .join(" | ")
}

/// serde hook for optional plain-string fields.
pub fn deserialize_plain_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(d)? {
    Value::Null => Ok(None),
    Value::String(s) => Ok(Some(s)),
    Value::Object(map) => Ok(Some(flatten_mapping(&map))),
    other => Err(de::Error::custom(format!("expected a string, got {other}"))),
  }
}
