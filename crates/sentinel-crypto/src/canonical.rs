//! Deterministic JSON encoding used as hash input.
//!
//! The byte layout is frozen. Changing any rule here makes every hash on an
//! existing chain unverifiable.
//!
//! - object keys sorted by byte order at every nesting level
//! - no whitespace; `,` between entries and `:` between key and value
//! - strings escaped as standard JSON, non-ASCII left as raw UTF-8
//! - numbers in serde_json's shortest round-trip form

use serde::Serialize;
use serde_json::{Map, Value};

use crate::finite::ensure_finite;

/// Errors from canonical encoding.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("value cannot be represented as JSON: {0}")]
    Unrepresentable(String),

    #[error("non-finite number cannot be encoded deterministically")]
    NonFiniteNumber,
}

/// Serialize any value and return its canonical bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    encode_value(&to_value(value)?)
}

/// Convert to a JSON value, failing on NaN or infinities instead of
/// writing them as `null`.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, EncodingError> {
    ensure_finite(value)?;
    serde_json::to_value(value).map_err(|e| EncodingError::Unrepresentable(e.to_string()))
}

/// Canonical bytes of an already-built JSON value.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(128);
    write_value(&mut out, value)?;
    Ok(out)
}

fn write_value(out: &mut Vec<u8>, value: &Value) -> Result<(), EncodingError> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(_) | Value::String(_) => write_scalar(out, value)?,
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item)?;
            }
            out.push(b']');
        }
        Value::Object(map) => write_object(out, map)?,
    }
    Ok(())
}

fn write_object(out: &mut Vec<u8>, map: &Map<String, Value>) -> Result<(), EncodingError> {
    // Map iteration order depends on serde_json's `preserve_order` feature.
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    out.push(b'{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        serde_json::to_writer(&mut *out, key)
            .map_err(|e| EncodingError::Unrepresentable(e.to_string()))?;
        out.push(b':');
        write_value(out, value)?;
    }
    out.push(b'}');
    Ok(())
}

fn write_scalar(out: &mut Vec<u8>, value: &Value) -> Result<(), EncodingError> {
    serde_json::to_writer(&mut *out, value).map_err(|e| EncodingError::Unrepresentable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn encoded(value: Value) -> String {
        String::from_utf8(encode_value(&value).unwrap()).unwrap()
    }

    #[test]
    fn sorts_keys_and_strips_whitespace() {
        let value = json!({"b": 1, "a": {"d": [1, 2], "c": null}});
        assert_eq!(encoded(value), r#"{"a":{"c":null,"d":[1,2]},"b":1}"#);
    }

    #[test]
    fn scalars_use_standard_json_forms() {
        assert_eq!(encoded(json!(true)), "true");
        assert_eq!(encoded(json!(0.97)), "0.97");
        assert_eq!(encoded(json!(1.0)), "1.0");
        assert_eq!(encoded(json!(-7)), "-7");
        assert_eq!(encoded(json!("tab\there \"q\"")), r#""tab\there \"q\"""#);
    }

    #[test]
    fn non_ascii_stays_utf8() {
        assert_eq!(encoded(json!({"k": "café"})), "{\"k\":\"café\"}");
    }

    #[test]
    fn keys_sort_by_bytes_not_case() {
        let value = json!({"b": 0, "B": 0, "a": 0, "_": 0});
        assert_eq!(encoded(value), r#"{"B":0,"_":0,"a":0,"b":0}"#);
    }

    #[test]
    fn array_order_is_preserved() {
        assert_eq!(encoded(json!([3, 1, 2])), "[3,1,2]");
    }

    #[test]
    fn encode_accepts_serialize_types() {
        let mut map = HashMap::new();
        map.insert("zeta", 1);
        map.insert("alpha", 2);
        let bytes = encode(&map).unwrap();
        assert_eq!(bytes, br#"{"alpha":2,"zeta":1}"#);
    }

    #[test]
    fn non_string_keys_are_rejected() {
        let mut map = HashMap::new();
        map.insert((1u8, 2u8), "pair-keyed");
        let err = encode(&map).unwrap_err();
        assert!(matches!(err, EncodingError::Unrepresentable(_)));
    }

    #[test]
    fn non_finite_floats_are_not_coerced_to_null() {
        let mut map = BTreeMap::new();
        map.insert("confidence", f64::NAN);
        assert_eq!(encode(&map), Err(EncodingError::NonFiniteNumber));

        map.insert("confidence", f64::INFINITY);
        assert_eq!(to_value(&map), Err(EncodingError::NonFiniteNumber));
    }

    proptest! {
        #[test]
        fn insertion_order_does_not_change_bytes(
            pairs in proptest::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..16)
        ) {
            let forward: Vec<(String, i64)> = pairs.clone().into_iter().collect();
            let mut reversed = forward.clone();
            reversed.reverse();

            let mut a = Map::new();
            for (k, v) in forward {
                a.insert(k, json!(v));
            }
            let mut b = Map::new();
            for (k, v) in reversed {
                b.insert(k, json!(v));
            }

            let nested_a = json!({"outer": Value::Object(a.clone()), "flat": Value::Object(a)});
            let nested_b = json!({"flat": Value::Object(b.clone()), "outer": Value::Object(b)});
            prop_assert_eq!(encode_value(&nested_a).unwrap(), encode_value(&nested_b).unwrap());

            let sorted: BTreeMap<String, i64> = pairs;
            prop_assert_eq!(
                encode(&sorted).unwrap(),
                encode_value(&nested_a["flat"]).unwrap()
            );
        }
    }
}
