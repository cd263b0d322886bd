//! Value trees.
//!
//! # Representation
//!
//! | Type shape              | Value variant                          |
//! |-------------------------|----------------------------------------|
//! | `bool`                  | `Bool`                                 |
//! | signed integers         | `Int` (stored widened to `i64`)        |
//! | unsigned integers       | `Uint` (stored widened to `u64`)       |
//! | floats                  | `Float` (stored widened to `f64`)      |
//! | `str` / `bytes`         | `Str` / `Bytes`                        |
//! | record                  | `Record`, fields in declaration order  |
//! | sequence                | `Sequence`                             |
//! | mapping                 | `Mapping`, `None` when absent          |
//! | indirection             | `Indirect`, `None` when empty          |
//! | `dyn`                   | `Dyn`, `None` when empty               |
//! | opaque host type        | `Opaque`                               |
//!
//! Named types share the representation of their underlying type.

use recast_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::{Dynamic, Idx, Key, OpaqueValue};

/// Entries of a mapping value.
pub type Mapping = FxHashMap<Key, Value>;

/// Runtime value.
///
/// Cloning, comparing and dropping recurse once per nesting level and grow
/// the stack as they go, so arbitrarily deep trees are safe to handle.
#[derive(Debug)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Signed integer of any width.
    Int(i64),
    /// Unsigned integer of any width.
    Uint(u64),
    /// Floating point of any width.
    Float(f64),
    /// UTF-8 string.
    Str(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Record fields in declaration order.
    Record(Vec<Value>),
    /// Ordered elements.
    Sequence(Vec<Value>),
    /// Key/value entries; `None` is an absent mapping.
    Mapping(Option<Mapping>),
    /// Optional reference; `None` is an empty wrapper.
    Indirect(Option<Box<Value>>),
    /// A value together with its dynamic type; `None` is an empty slot.
    Dyn(Option<Box<Dynamic>>),
    /// Host value the transcoder treats as a leaf.
    Opaque(OpaqueValue),
}

// Factory Methods

impl Value {
    /// Empty indirection.
    pub const NULL: Value = Value::Indirect(None);

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a record value from its fields in declaration order.
    #[inline]
    pub fn record(fields: Vec<Value>) -> Self {
        Value::Record(fields)
    }

    /// Create a sequence value.
    #[inline]
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }

    /// Create a present mapping value.
    ///
    /// ```text
    /// let m = Value::mapping([(Key::Int(3), Value::Int(1))]);
    /// ```
    pub fn mapping(entries: impl IntoIterator<Item = (Key, Value)>) -> Self {
        Value::Mapping(Some(entries.into_iter().collect()))
    }

    /// Wrap a value in a present indirection.
    #[inline]
    pub fn some(inner: Value) -> Self {
        Value::Indirect(Some(Box::new(inner)))
    }

    /// Store a typed value in a `dyn` slot.
    #[inline]
    pub fn dynamic(ty: Idx, value: Value) -> Self {
        Value::Dyn(Some(Box::new(Dynamic::new(ty, value))))
    }

    /// Wrap a host value.
    #[inline]
    pub fn opaque(value: OpaqueValue) -> Self {
        Value::Opaque(value)
    }
}

// Value Methods

impl Value {
    /// Variant name for traces.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Record(_) => "record",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Indirect(_) => "indirect",
            Value::Dyn(_) => "dyn",
            Value::Opaque(_) => "opaque",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Record fields, if this is a record.
    pub fn as_record(&self) -> Option<&[Value]> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping entries. `None` for non-mappings and for absent mappings.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(entries) => entries.as_ref(),
            _ => None,
        }
    }

    /// Target of a present indirection.
    pub fn deref(&self) -> Option<&Value> {
        match self {
            Value::Indirect(inner) => inner.as_deref(),
            _ => None,
        }
    }

    /// Contents of a present `dyn` slot.
    pub fn as_dyn(&self) -> Option<&Dynamic> {
        match self {
            Value::Dyn(inner) => inner.as_deref(),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&OpaqueValue> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_opaque_mut(&mut self) -> Option<&mut OpaqueValue> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Target of an indirection, allocating it with `init` when empty.
    ///
    /// Returns `None` if this is not an indirection.
    pub fn materialize_with(&mut self, init: impl FnOnce() -> Value) -> Option<&mut Value> {
        match self {
            Value::Indirect(inner) => Some(inner.get_or_insert_with(|| Box::new(init()))),
            _ => None,
        }
    }

    /// Mapping entries, replacing an absent mapping with an empty one.
    ///
    /// Returns `None` if this is not a mapping.
    pub fn materialize_mapping(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(entries) => Some(entries.get_or_insert_with(Mapping::default)),
            _ => None,
        }
    }
}

// Stack-Safe Traits

impl Clone for Value {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| match self {
            Value::Bool(b) => Value::Bool(*b),
            Value::Int(n) => Value::Int(*n),
            Value::Uint(n) => Value::Uint(*n),
            Value::Float(f) => Value::Float(*f),
            Value::Str(s) => Value::Str(s.clone()),
            Value::Bytes(b) => Value::Bytes(b.clone()),
            Value::Record(fields) => Value::Record(fields.clone()),
            Value::Sequence(items) => Value::Sequence(items.clone()),
            Value::Mapping(entries) => Value::Mapping(entries.clone()),
            Value::Indirect(inner) => Value::Indirect(inner.clone()),
            Value::Dyn(inner) => Value::Dyn(inner.clone()),
            Value::Opaque(o) => Value::Opaque(o.clone()),
        })
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "structural equality compares floats exactly")]
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Record(a), Value::Record(b)) | (Value::Sequence(a), Value::Sequence(b)) => {
                a == b
            }
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Indirect(a), Value::Indirect(b)) => a == b,
            (Value::Dyn(a), Value::Dyn(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => a == b,
            _ => false,
        })
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        match self {
            Value::Record(items) | Value::Sequence(items) if !items.is_empty() => {
                let items = std::mem::take(items);
                ensure_sufficient_stack(move || drop(items));
            }
            Value::Mapping(entries) if entries.as_ref().is_some_and(|e| !e.is_empty()) => {
                let entries = entries.take();
                ensure_sufficient_stack(move || drop(entries));
            }
            Value::Indirect(inner) if inner.is_some() => {
                let inner = inner.take();
                ensure_sufficient_stack(move || drop(inner));
            }
            Value::Dyn(inner) if inner.is_some() => {
                let inner = inner.take();
                ensure_sufficient_stack(move || drop(inner));
            }
            _ => {}
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
