//! Type handle.
//!
//! `Idx` is a 32-bit index into a `recast_types::Pool`. Scalar types are
//! pre-interned at fixed indices so callers can name them without a pool,
//! everything else is allocated by the pool on demand.
//!
//! Equality of two `Idx` values is type identity: structural types
//! (sequences, mappings, indirections) are interned, nominal types (records,
//! named types, opaque types) get a fresh index per definition.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Scalar Types (indices 0-15) ===

    /// `bool`.
    pub const BOOL: Self = Self(0);
    /// `int`, the platform integer (64-bit). Distinct from `int64`.
    pub const INT: Self = Self(1);
    /// `int8`.
    pub const INT8: Self = Self(2);
    /// `int16`.
    pub const INT16: Self = Self(3);
    /// `int32`.
    pub const INT32: Self = Self(4);
    /// `int64`.
    pub const INT64: Self = Self(5);
    /// `uint`, the platform unsigned integer (64-bit). Distinct from `uint64`.
    pub const UINT: Self = Self(6);
    /// `uint8`.
    pub const UINT8: Self = Self(7);
    /// `uint16`.
    pub const UINT16: Self = Self(8);
    /// `uint32`.
    pub const UINT32: Self = Self(9);
    /// `uint64`.
    pub const UINT64: Self = Self(10);
    /// `float32`.
    pub const FLOAT32: Self = Self(11);
    /// `float64`.
    pub const FLOAT64: Self = Self(12);
    /// UTF-8 string.
    pub const STR: Self = Self(13);
    /// Raw byte string.
    pub const BYTES: Self = Self(14);
    /// Slot that holds any typed value together with its dynamic type.
    pub const DYN: Self = Self(15);

    /// Number of pre-interned scalar types.
    pub const PRIMITIVE_COUNT: u32 = 16;

    /// First index handed out by the pool for non-scalar types.
    pub const FIRST_DYNAMIC: u32 = Self::PRIMITIVE_COUNT;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index was produced by the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a pre-interned scalar type.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Human-readable name for pre-interned types, `None` otherwise.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("bool"),
            1 => Some("int"),
            2 => Some("int8"),
            3 => Some("int16"),
            4 => Some("int32"),
            5 => Some("int64"),
            6 => Some("uint"),
            7 => Some("uint8"),
            8 => Some("uint16"),
            9 => Some("uint32"),
            10 => Some("uint64"),
            11 => Some("float32"),
            12 => Some("float64"),
            13 => Some("str"),
            14 => Some("bytes"),
            15 => Some("dyn"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx({name})"),
            None if self.is_none() => write!(f, "Idx::NONE"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if self.is_none() => f.write_str("<none>"),
            None => write!(f, "type#{}", self.0),
        }
    }
}

crate::static_assert_size!(Idx, 4);
