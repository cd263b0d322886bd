//! Typed values.

use crate::{Idx, Value};

/// An owned value together with its type.
#[derive(Clone, Debug, PartialEq)]
pub struct Dynamic {
    pub ty: Idx,
    pub value: Value,
}

impl Dynamic {
    #[inline]
    pub fn new(ty: Idx, value: impl Into<Value>) -> Self {
        Dynamic {
            ty,
            value: value.into(),
        }
    }

    /// Borrow as a read-only location.
    #[inline]
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        ValueRef {
            ty: self.ty,
            value: &self.value,
        }
    }
}

/// A borrowed value together with its type. Source locations are always
/// `ValueRef`s, so the transcoder cannot mutate its input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ValueRef<'a> {
    pub ty: Idx,
    pub value: &'a Value,
}

impl<'a> ValueRef<'a> {
    #[inline]
    pub fn new(ty: Idx, value: &'a Value) -> Self {
        ValueRef { ty, value }
    }

    /// Clone into an owned [`Dynamic`].
    pub fn to_dynamic(self) -> Dynamic {
        Dynamic {
            ty: self.ty,
            value: self.value.clone(),
        }
    }
}
