//! Canonical JSON serialization helpers.
//!
//! Serializes structures with deterministically sorted object keys and
//! stable formatting so that learned trees and codebooks can be hashed and
//! compared across runs.

use serde::{ser::Error as SerdeSerError, Serialize};
use serde_json::{self, map::Map, ser::PrettyFormatter, Serializer, Value};
use std::io::Write;

/// Recursively sort JSON object keys to obtain a canonical representation.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, val) in entries {
                sorted.insert(key, canonicalize(val));
            }

            Value::Object(sorted)
        }
        Value::Array(elements) => Value::Array(elements.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serialize a value into canonical JSON and write it to the provided writer.
pub fn write_canonical_json<T, W>(mut writer: W, value: &T) -> Result<(), serde_json::Error>
where
    T: Serialize,
    W: Write,
{
    let canonical_value = canonicalize(serde_json::to_value(value)?);
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut writer, formatter);
    canonical_value.serialize(&mut serializer)?;
    Ok(())
}

/// Serialize a value into canonical JSON and return it as a String.
pub fn canonical_json_string<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize,
{
    let mut buffer = Vec::new();
    write_canonical_json(&mut buffer, value)?;
    String::from_utf8(buffer).map_err(|err| SerdeSerError::custom(err.to_string()))
}

/// Lowercase hex BLAKE3 digest of the canonical JSON form.
pub fn fingerprint_hex<T>(value: &T) -> crate::errors::Result<String>
where
    T: Serialize,
{
    let json = canonical_json_string(value)?;
    Ok(hex::encode(blake3::hash(json.as_bytes()).as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_keys_are_sorted() -> Result<(), serde_json::Error> {
        let mut map = HashMap::new();
        map.insert("split", 1);
        map.insert("leaf", 2);
        map.insert("arity", 3);

        let json = canonical_json_string(&map)?;
        let arity = json.find("arity").unwrap();
        let leaf = json.find("leaf").unwrap();
        let split = json.find("split").unwrap();
        assert!(arity < leaf && leaf < split);

        Ok(())
    }

    #[test]
    fn test_fingerprint_is_stable() -> crate::errors::Result<()> {
        let a = fingerprint_hex(&vec!["red", "blue"])?;
        let b = fingerprint_hex(&vec!["red", "blue"])?;
        let c = fingerprint_hex(&vec!["blue", "red"])?;

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);

        Ok(())
    }
}
