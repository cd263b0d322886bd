//! Mapping keys.

use std::fmt;

use crate::Value;

/// Hashable subset of [`Value`] used as mapping keys.
///
/// Mapping key types are restricted by the pool to scalars with a hashable
/// representation, so floats never appear here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Key {
    /// The key as a value, for running it through scalar conversion.
    pub fn to_value(&self) -> Value {
        match self {
            Key::Bool(b) => Value::Bool(*b),
            Key::Int(n) => Value::Int(*n),
            Key::Uint(n) => Value::Uint(*n),
            Key::Str(s) => Value::Str(s.clone()),
            Key::Bytes(b) => Value::Bytes(b.clone()),
        }
    }

    /// Turn a scalar value back into a key.
    pub fn from_value(mut value: Value) -> Option<Key> {
        match &mut value {
            Value::Bool(b) => Some(Key::Bool(*b)),
            Value::Int(n) => Some(Key::Int(*n)),
            Value::Uint(n) => Some(Key::Uint(*n)),
            Value::Str(s) => Some(Key::Str(std::mem::take(s))),
            Value::Bytes(b) => Some(Key::Bytes(std::mem::take(b))),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<u64> for Key {
    fn from(n: u64) -> Self {
        Key::Uint(n)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{b}"),
            Key::Int(n) => write!(f, "{n}"),
            Key::Uint(n) => write!(f, "{n}"),
            Key::Str(s) => write!(f, "{s:?}"),
            Key::Bytes(b) => write!(f, "{b:?}"),
        }
    }
}
