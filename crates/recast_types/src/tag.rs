//! Type tags.
//!
//! The tag is the discriminant of a pool item. Values are grouped by range:
//!
//! | Range  | Category                                  | `data` holds          |
//! |--------|-------------------------------------------|-----------------------|
//! | 0-15   | primitives, in [`Idx`](crate::Idx) order  | unused                |
//! | 16-31  | one-child structural types                | child index           |
//! | 32-47  | two-child structural types                | offset into `extra`   |
//! | 48-63  | nominal types                             | definition slot       |

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Primitives (0-15) ===
    Bool = 0,
    Int = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    Uint = 6,
    Uint8 = 7,
    Uint16 = 8,
    Uint32 = 9,
    Uint64 = 10,
    Float32 = 11,
    Float64 = 12,
    Str = 13,
    Bytes = 14,
    /// Slot that holds a value of any type together with that type.
    Dyn = 15,

    // === One-child structural types (16-31) ===
    /// Optional reference `*T`.
    Indirect = 16,
    /// Growable sequence `[]T`.
    Sequence = 17,

    // === Two-child structural types (32-47) ===
    /// Mapping `map[K]V`. Extra layout: `[key, value]`.
    Mapping = 32,

    // === Nominal types (48-63) ===
    /// Record with named fields.
    Record = 48,
    /// Distinct name over an underlying type.
    Named = 49,
    /// Host type the transcoder cannot look inside.
    Opaque = 50,
}

impl Tag {
    /// Primitive tags in [`Idx`](crate::Idx) order.
    pub const PRIMITIVES: [Tag; 16] = [
        Tag::Bool,
        Tag::Int,
        Tag::Int8,
        Tag::Int16,
        Tag::Int32,
        Tag::Int64,
        Tag::Uint,
        Tag::Uint8,
        Tag::Uint16,
        Tag::Uint32,
        Tag::Uint64,
        Tag::Float32,
        Tag::Float64,
        Tag::Str,
        Tag::Bytes,
        Tag::Dyn,
    ];

    #[inline]
    pub const fn is_primitive(self) -> bool {
        (self as u8) < 16
    }

    /// Structural tags are interned by content and have no name of their own.
    #[inline]
    pub const fn is_structural(self) -> bool {
        let v = self as u8;
        v >= 16 && v < 48
    }

    #[inline]
    pub const fn is_nominal(self) -> bool {
        (self as u8) >= 48
    }

    #[inline]
    pub const fn uses_extra(self) -> bool {
        matches!(self, Self::Mapping)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Str => "str",
            Self::Bytes => "bytes",
            Self::Dyn => "dyn",
            Self::Indirect => "indirect",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Record => "record",
            Self::Named => "named",
            Self::Opaque => "opaque",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const _: () = assert!(std::mem::size_of::<Tag>() == 1);
