//! Opaque host values and the two hook capabilities.
//!
//! The transcoder cannot look inside an opaque value. It can only assign it
//! wholesale to a slot of the same type, or, when the caller's policy allows
//! it, ask the value to describe itself ([`Extract`]) or to absorb a source
//! value ([`Scan`]).
//!
//! Capabilities are discovered per value through [`Opaque::as_extract`] and
//! [`Opaque::as_scan`]; both default to "not supported".
//!
//! ```text
//! #[derive(Clone, Debug, PartialEq)]
//! struct Timestamp(i64);
//!
//! impl Opaque for Timestamp {
//!     fn as_extract(&self) -> Option<&dyn Extract> { Some(self) }
//! }
//!
//! impl Extract for Timestamp {
//!     fn extract(&self) -> Result<Option<Dynamic>, HookError> {
//!         Ok(Some(Dynamic::new(Idx::INT64, self.0)))
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt;

use crate::{Dynamic, ValueRef};

/// Failure reported by a hook implementation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        HookError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Value-extraction capability: replace this value with a simpler one.
pub trait Extract {
    /// `Ok(None)` means "no value", which the transcoder treats like an
    /// absent source.
    fn extract(&self) -> Result<Option<Dynamic>, HookError>;
}

/// Scan-assignment capability: overwrite this value from an arbitrary source.
pub trait Scan {
    fn scan(&mut self, source: ValueRef<'_>) -> Result<(), HookError>;
}

/// Object-safe plumbing for [`Opaque`], implemented automatically for every
/// `Clone + PartialEq + Debug + Send + Sync` opaque type.
pub trait OpaqueObject: Any + fmt::Debug + Send + Sync {
    fn clone_object(&self) -> Box<dyn Opaque>;
    fn eq_object(&self, other: &dyn Opaque) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<T> OpaqueObject for T
where
    T: Opaque + Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn clone_object(&self) -> Box<dyn Opaque> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn Opaque) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A host type carried through the transcoder as a leaf.
pub trait Opaque: OpaqueObject {
    fn as_extract(&self) -> Option<&dyn Extract> {
        None
    }

    fn as_scan(&mut self) -> Option<&mut dyn Scan> {
        None
    }
}

/// Owned, clonable, comparable handle to an [`Opaque`] object.
pub struct OpaqueValue(Box<dyn Opaque>);

impl OpaqueValue {
    pub fn new(object: impl Opaque) -> Self {
        OpaqueValue(Box::new(object))
    }

    pub fn from_boxed(object: Box<dyn Opaque>) -> Self {
        OpaqueValue(object)
    }

    pub fn get(&self) -> &dyn Opaque {
        self.0.as_ref()
    }

    pub fn get_mut(&mut self) -> &mut dyn Opaque {
        self.0.as_mut()
    }

    pub fn downcast_ref<T: Opaque>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Clone for OpaqueValue {
    fn clone(&self) -> Self {
        OpaqueValue(self.0.clone_object())
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_object(other.0.as_ref())
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
