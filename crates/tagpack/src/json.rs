//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON has fewer types, so converting to JSON loses the exact width of
//! numbers, and the rich types become numbers or strings:
//!
//! - integers wider than 64 bits become decimal strings
//! - non-finite floats become `null`
//! - maps with only string keys become objects, other maps become arrays of
//!   `[key, value]` pairs
//! - instants and durations become numbers, UUIDs hyphenated hex strings
//!
//! From JSON, non-negative integers become [`Value::VarUint`], negative ones
//! [`Value::VarInt`], other numbers [`Value::F64`].

use std::fmt::Write;

use serde_json::{Map as JsonMap, Number};
use thiserror::Error;

use crate::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonConversionError {
    #[error("null has no tagpack representation")]
    Null,
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Value::Bool(b) => Json::Bool(*b),
            Value::U8(n) => Json::from(*n),
            Value::U16(n) => Json::from(*n),
            Value::U32(n) => Json::from(*n),
            Value::U64(n) => Json::from(*n),
            Value::I8(n) => Json::from(*n),
            Value::I16(n) => Json::from(*n),
            Value::I32(n) => Json::from(*n),
            Value::I64(n) => Json::from(*n),
            Value::F32(f) => float(*f as f64),
            Value::F64(f) => float(*f),
            Value::VarUint(n) => match u64::try_from(*n) {
                Ok(small) => Json::from(small),
                Err(_) => Json::String(n.to_string()),
            },
            Value::VarInt(n) => match i64::try_from(*n) {
                Ok(small) => Json::from(small),
                Err(_) => Json::String(n.to_string()),
            },
            Value::Str(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Json::from).collect()),
            Value::Map(map) => map_to_json(map),
            Value::Instant(ms) => Json::from(*ms),
            Value::Duration(d) => Json::from(*d),
            Value::Uuid(uuid) => Json::String(format_uuid(uuid)),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        serde_json::Value::from(&value)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = JsonConversionError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;
        Ok(match json {
            Json::Null => return Err(JsonConversionError::Null),
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => number(&n),
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Json::Object(obj) => {
                let mut map = Map::with_capacity(obj.len());
                for (k, v) in obj {
                    map.insert(Value::Str(k), Value::try_from(v)?);
                }
                Value::Map(map)
            }
        })
    }
}

fn float(f: f64) -> serde_json::Value {
    Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn number(n: &Number) -> Value {
    if let Some(u) = n.as_u64() {
        Value::VarUint(u as u128)
    } else if let Some(i) = n.as_i64() {
        Value::VarInt(i as i128)
    } else {
        Value::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn map_to_json(map: &Map) -> serde_json::Value {
    if map.keys().all(|k| matches!(k, Value::Str(_))) {
        let mut obj = JsonMap::with_capacity(map.len());
        for (k, v) in map {
            if let Value::Str(key) = k {
                obj.insert(key.clone(), v.into());
            }
        }
        serde_json::Value::Object(obj)
    } else {
        serde_json::Value::Array(
            map.iter()
                .map(|(k, v)| serde_json::Value::Array(vec![k.into(), v.into()]))
                .collect(),
        )
    }
}

fn format_uuid(uuid: &[u8; 16]) -> String {
    let mut out = String::with_capacity(36);
    for (i, byte) in uuid.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}
