//! Type pool for the recast transcoder.
//!
//! Every type is an [`Idx`] into a [`Pool`]. Structural types (indirections,
//! sequences, mappings) are interned, so equal structure means equal index.
//! Nominal types (records, named types, opaque host types) get a fresh index
//! per declaration.
//!
//! The pool also owns the rules the transcoder needs at the leaves:
//! [`Pool::assignable`], [`Pool::convertible`], [`Pool::convert`] and
//! [`Pool::zero`].

mod convert;
mod error;
mod pool;
mod record;
mod shape;
mod tag;

pub use error::TypeError;
pub use pool::{OpaqueId, Pool, RecordId, ZeroFn};
pub use recast_ir::Idx;
pub use record::{FieldDef, FieldSource, FlatField, RecordDef, Step, Visibility};
pub use shape::{ScalarKind, Shape};
pub use tag::Tag;
