//! The dynamically typed [`Value`] tree that encoders and decoders work on.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem;

use indexmap::IndexMap;

use crate::TypeId;

/// Insertion-ordered map of values. Re-inserting a key keeps its position and
/// replaces the value.
pub type Map = IndexMap<Value, Value>;

/// A self-describing value.
///
/// Each variant maps to exactly one [`TypeId`]. Equality is structural:
/// floats compare by bit pattern (so `NaN` equals itself and `0.0` differs
/// from `-0.0`), arrays compare element-wise in order, and maps compare as
/// sets of entries regardless of order.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Variable-length unsigned integer.
    VarUint(u128),
    /// Variable-length signed integer.
    VarInt(i128),
    Str(String),
    Array(Vec<Value>),
    Map(Map),
    /// Milliseconds since the Unix epoch.
    Instant(i64),
    /// Opaque signed magnitude; the unit is up to the caller.
    Duration(i64),
    Uuid([u8; 16]),
}

impl Value {
    /// The tag this value is written with.
    pub fn tag(&self) -> TypeId {
        match self {
            Value::Bool(_) => TypeId::Bool,
            Value::U8(_) => TypeId::U8,
            Value::U16(_) => TypeId::U16,
            Value::U32(_) => TypeId::U32,
            Value::U64(_) => TypeId::U64,
            Value::I8(_) => TypeId::I8,
            Value::I16(_) => TypeId::I16,
            Value::I32(_) => TypeId::I32,
            Value::I64(_) => TypeId::I64,
            Value::F32(_) => TypeId::F32,
            Value::F64(_) => TypeId::F64,
            Value::VarUint(_) => TypeId::VarUint,
            Value::VarInt(_) => TypeId::VarInt,
            Value::Str(_) => TypeId::Str,
            Value::Array(_) => TypeId::Array,
            Value::Map(_) => TypeId::Map,
            Value::Instant(_) => TypeId::Instant,
            Value::Duration(_) => TypeId::Duration,
            Value::Uuid(_) => TypeId::Uuid,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any unsigned variant whose value fits in `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U8(n) => Some(*n as u64),
            Value::U16(n) => Some(*n as u64),
            Value::U32(n) => Some(*n as u64),
            Value::U64(n) => Some(*n),
            Value::VarUint(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Any signed variant whose value fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(n) => Some(*n as i64),
            Value::I16(n) => Some(*n as i64),
            Value::I32(n) => Some(*n as i64),
            Value::I64(n) => Some(*n),
            Value::VarInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Value::VarUint(n) => Some(*n),
            _ => self.as_u64().map(u128::from),
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::VarInt(n) => Some(*n),
            _ => self.as_i64().map(i128::from),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(f) => Some(*f as f64),
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<i64> {
        match self {
            Value::Instant(ms) => Some(*ms),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<i64> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&[u8; 16]> {
        match self {
            Value::Uuid(uuid) => Some(uuid),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a.to_bits() == b.to_bits(),
            (Value::F64(a), Value::F64(b)) => a.to_bits() == b.to_bits(),
            (Value::VarUint(a), Value::VarUint(b)) => a == b,
            (Value::VarInt(a), Value::VarInt(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Instant(a), Value::Instant(b)) => a == b,
            (Value::Duration(a), Value::Duration(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::U8(n) => n.hash(state),
            Value::U16(n) => n.hash(state),
            Value::U32(n) => n.hash(state),
            Value::U64(n) => n.hash(state),
            Value::I8(n) => n.hash(state),
            Value::I16(n) => n.hash(state),
            Value::I32(n) => n.hash(state),
            Value::I64(n) => n.hash(state),
            Value::F32(f) => f.to_bits().hash(state),
            Value::F64(f) => f.to_bits().hash(state),
            Value::VarUint(n) => n.hash(state),
            Value::VarInt(n) => n.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            // map equality ignores order, so entry hashes are summed
            Value::Map(map) => {
                map.len().hash(state);
                map.iter()
                    .map(|entry| {
                        let mut hasher = DefaultHasher::new();
                        entry.hash(&mut hasher);
                        hasher.finish()
                    })
                    .fold(0u64, u64::wrapping_add)
                    .hash(state);
            }
            Value::Instant(ms) => ms.hash(state),
            Value::Duration(d) => d.hash(state),
            Value::Uuid(uuid) => uuid.hash(state),
        }
    }
}

macro_rules! from_impl {
    ($(($ty:ty, $var:ident)),+ $(,)?) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$var(v)
            }
        })+
    };
}

from_impl!(
    (bool, Bool),
    (u8, U8),
    (u16, U16),
    (u32, U32),
    (u64, U64),
    (i8, I8),
    (i16, I16),
    (i32, I32),
    (i64, I64),
    (f32, F32),
    (f64, F64),
    (u128, VarUint),
    (i128, VarInt),
    (String, Str),
    (Map, Map),
    ([u8; 16], Uuid),
);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
