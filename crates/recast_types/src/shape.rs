//! Structural view of a type.

use crate::{Idx, OpaqueId, Pool, RecordId, Tag};

/// Leaf kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    /// Signed integer of the given bit width.
    Int { bits: u8 },
    /// Unsigned integer of the given bit width.
    Uint { bits: u8 },
    Float { bits: u8 },
    Str,
    Bytes,
    Dyn,
    Opaque(OpaqueId),
}

impl ScalarKind {
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ScalarKind::Int { .. } | ScalarKind::Uint { .. } | ScalarKind::Float { .. }
        )
    }

    #[inline]
    pub fn is_text(self) -> bool {
        matches!(self, ScalarKind::Str | ScalarKind::Bytes)
    }

    /// Whether values of this kind can be mapping keys.
    #[inline]
    pub fn is_hashable(self) -> bool {
        matches!(
            self,
            ScalarKind::Bool
                | ScalarKind::Int { .. }
                | ScalarKind::Uint { .. }
                | ScalarKind::Str
                | ScalarKind::Bytes
        )
    }
}

/// What the transcoder dispatches on. Named types report the shape of their
/// underlying type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Indirect(Idx),
    Record(RecordId),
    Sequence(Idx),
    Mapping { key: Idx, value: Idx },
    Scalar(ScalarKind),
}

impl Pool {
    pub fn shape(&self, idx: Idx) -> Shape {
        match self.tag(idx) {
            Tag::Bool => Shape::Scalar(ScalarKind::Bool),
            Tag::Int | Tag::Int64 => Shape::Scalar(ScalarKind::Int { bits: 64 }),
            Tag::Int8 => Shape::Scalar(ScalarKind::Int { bits: 8 }),
            Tag::Int16 => Shape::Scalar(ScalarKind::Int { bits: 16 }),
            Tag::Int32 => Shape::Scalar(ScalarKind::Int { bits: 32 }),
            Tag::Uint | Tag::Uint64 => Shape::Scalar(ScalarKind::Uint { bits: 64 }),
            Tag::Uint8 => Shape::Scalar(ScalarKind::Uint { bits: 8 }),
            Tag::Uint16 => Shape::Scalar(ScalarKind::Uint { bits: 16 }),
            Tag::Uint32 => Shape::Scalar(ScalarKind::Uint { bits: 32 }),
            Tag::Float32 => Shape::Scalar(ScalarKind::Float { bits: 32 }),
            Tag::Float64 => Shape::Scalar(ScalarKind::Float { bits: 64 }),
            Tag::Str => Shape::Scalar(ScalarKind::Str),
            Tag::Bytes => Shape::Scalar(ScalarKind::Bytes),
            Tag::Dyn => Shape::Scalar(ScalarKind::Dyn),
            Tag::Indirect => Shape::Indirect(Idx::from_raw(self.data(idx))),
            Tag::Sequence => Shape::Sequence(Idx::from_raw(self.data(idx))),
            Tag::Mapping => {
                let (key, value) = self.mapping_parts(idx);
                Shape::Mapping { key, value }
            }
            Tag::Record => Shape::Record(RecordId::from_raw(self.data(idx))),
            Tag::Opaque => Shape::Scalar(ScalarKind::Opaque(OpaqueId::from_raw(self.data(idx)))),
            Tag::Named => self.shape(self.underlying(idx)),
        }
    }

    /// Leaf kind, or `None` for composite shapes.
    #[inline]
    pub fn scalar_kind(&self, idx: Idx) -> Option<ScalarKind> {
        match self.shape(idx) {
            Shape::Scalar(kind) => Some(kind),
            _ => None,
        }
    }
}
