//! Assignment and conversion rules at the leaves.
//!
//! Assignability copies a value as is. Conversion rewrites it:
//!
//! | From            | To              | Result                                  |
//! |-----------------|-----------------|-----------------------------------------|
//! | any numeric     | any numeric     | machine cast (wraps, truncates)         |
//! | named `T`       | underlying of T | unchanged (and back)                    |
//! | `str`           | `bytes`         | UTF-8 encoding                          |
//! | `bytes`         | `str`           | lossy UTF-8 decoding                    |
//! | anything        | `dyn`           | stored together with its type           |
//!
//! Integers never convert to strings.

use recast_value::{OpaqueValue, Value, ValueRef};

use crate::{Idx, Pool, ScalarKind, Shape};

impl Pool {
    /// A value of `src` can be stored in a slot of `dst` without conversion:
    /// the types are identical, `dst` is `dyn`, or both have the same
    /// underlying type and at most one of them has a name.
    pub fn assignable(&self, src: Idx, dst: Idx) -> bool {
        if src == dst || self.is_dyn(dst) {
            return true;
        }
        self.underlying(src) == self.underlying(dst) && !(self.has_name(src) && self.has_name(dst))
    }

    pub fn convertible(&self, src: Idx, dst: Idx) -> bool {
        if self.assignable(src, dst) || self.underlying(src) == self.underlying(dst) {
            return true;
        }
        match (self.scalar_kind(src), self.scalar_kind(dst)) {
            (Some(s), Some(d)) => {
                (s.is_numeric() && d.is_numeric()) || (s.is_text() && d.is_text())
            }
            _ => false,
        }
    }

    /// Convert `src` to a value of type `dst`.
    ///
    /// `None` when the types are not convertible or the value does not match
    /// its declared type.
    pub fn convert(&self, src: ValueRef<'_>, dst: Idx) -> Option<Value> {
        if self.is_dyn(dst) {
            return Some(Value::dynamic(src.ty, src.value.clone()));
        }
        if self.underlying(src.ty) == self.underlying(dst) {
            return Some(src.value.clone());
        }
        let from = self.scalar_kind(src.ty)?;
        let to = self.scalar_kind(dst)?;
        match (from, to) {
            (_, ScalarKind::Int { bits }) if from.is_numeric() => {
                Number::of(src.value).map(|n| Value::Int(n.to_int(bits)))
            }
            (_, ScalarKind::Uint { bits }) if from.is_numeric() => {
                Number::of(src.value).map(|n| Value::Uint(n.to_uint(bits)))
            }
            (_, ScalarKind::Float { bits }) if from.is_numeric() => {
                Number::of(src.value).map(|n| Value::Float(n.to_float(bits)))
            }
            (ScalarKind::Str, ScalarKind::Bytes) => {
                src.value.as_str().map(|s| Value::Bytes(s.as_bytes().to_vec()))
            }
            (ScalarKind::Bytes, ScalarKind::Str) => src
                .value
                .as_bytes()
                .map(|b| Value::Str(String::from_utf8_lossy(b).into_owned())),
            _ => None,
        }
    }

    /// The zero value of a type.
    ///
    /// Records get a zero for every field; indirections, mappings and `dyn`
    /// slots start empty.
    pub fn zero(&self, ty: Idx) -> Value {
        match self.shape(ty) {
            Shape::Scalar(kind) => match kind {
                ScalarKind::Bool => Value::Bool(false),
                ScalarKind::Int { .. } => Value::Int(0),
                ScalarKind::Uint { .. } => Value::Uint(0),
                ScalarKind::Float { .. } => Value::Float(0.0),
                ScalarKind::Str => Value::Str(String::new()),
                ScalarKind::Bytes => Value::Bytes(Vec::new()),
                ScalarKind::Dyn => Value::Dyn(None),
                ScalarKind::Opaque(id) => {
                    Value::Opaque(OpaqueValue::from_boxed(self.opaque_zero(id)))
                }
            },
            Shape::Indirect(_) => Value::NULL,
            Shape::Sequence(_) => Value::Sequence(Vec::new()),
            Shape::Mapping { .. } => Value::Mapping(None),
            Shape::Record(id) => match self.record_def(id) {
                Some(def) => Value::Record(def.fields().iter().map(|f| self.zero(f.ty)).collect()),
                None => Value::Record(Vec::new()),
            },
        }
    }

    #[inline]
    fn is_dyn(&self, ty: Idx) -> bool {
        self.underlying(ty) == Idx::DYN
    }
}

/// A numeric value widened to its storage class.
#[derive(Copy, Clone, Debug)]
enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "numeric conversion is a machine cast"
)]
impl Number {
    fn of(value: &Value) -> Option<Number> {
        match value {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Uint(n) => Some(Number::Uint(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    fn to_int(self, bits: u8) -> i64 {
        let raw = match self {
            Number::Int(n) => n,
            Number::Uint(n) => n as i64,
            Number::Float(f) => f as i64,
        };
        match bits {
            8 => i64::from(raw as i8),
            16 => i64::from(raw as i16),
            32 => i64::from(raw as i32),
            _ => raw,
        }
    }

    fn to_uint(self, bits: u8) -> u64 {
        let raw = match self {
            Number::Int(n) => n as u64,
            Number::Uint(n) => n,
            Number::Float(f) => f as u64,
        };
        match bits {
            8 => u64::from(raw as u8),
            16 => u64::from(raw as u16),
            32 => u64::from(raw as u32),
            _ => raw,
        }
    }

    fn to_float(self, bits: u8) -> f64 {
        let raw = match self {
            Number::Int(n) => n as f64,
            Number::Uint(n) => n as f64,
            Number::Float(f) => f,
        };
        if bits == 32 {
            f64::from(raw as f32)
        } else {
            raw
        }
    }
}
