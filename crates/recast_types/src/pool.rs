//! The type pool.
//!
//! Items are `(Tag, u32)` pairs stored in a flat vector; an [`Idx`] is an
//! index into it. The first [`Idx::PRIMITIVE_COUNT`] items are the primitive
//! types, in [`Tag::PRIMITIVES`] order, so primitive indices are constants.
//!
//! Structural items are deduplicated through the intern maps. Nominal items
//! point into one of the definition tables (`records`, `named`, `opaques`).

mod construct;
mod format;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use recast_value::Opaque;

use crate::{Idx, RecordDef, Tag};

/// Produces the zero value of an opaque host type.
pub type ZeroFn = fn() -> Box<dyn Opaque>;

/// Handle to a record definition slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(u32);

impl RecordId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        RecordId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to an opaque host type definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpaqueId(u32);

impl OpaqueId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        OpaqueId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct Item {
    tag: Tag,
    data: u32,
}

#[derive(Debug)]
struct RecordSlot {
    name: String,
    def: Option<RecordDef>,
}

#[derive(Debug)]
struct NamedDef {
    name: String,
    underlying: Idx,
}

#[derive(Debug)]
struct OpaqueDef {
    name: String,
    zero: ZeroFn,
}

/// Type storage.
///
/// A pool is built up front and then shared immutably by every transcoding
/// call that uses it.
#[derive(Debug)]
pub struct Pool {
    items: Vec<Item>,
    /// Out-of-line payloads for tags where [`Tag::uses_extra`] holds.
    extra: Vec<u32>,
    interned: FxHashMap<Item, Idx>,
    interned_complex: FxHashMap<(Tag, SmallVec<[u32; 2]>), Idx>,
    records: Vec<RecordSlot>,
    named: Vec<NamedDef>,
    opaques: Vec<OpaqueDef>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    /// Create a pool holding only the primitive types.
    pub fn new() -> Self {
        let items = Tag::PRIMITIVES
            .iter()
            .map(|&tag| Item { tag, data: 0 })
            .collect();
        Pool {
            items,
            extra: Vec::new(),
            interned: FxHashMap::default(),
            interned_complex: FxHashMap::default(),
            records: Vec::new(),
            named: Vec::new(),
            opaques: Vec::new(),
        }
    }

    /// Number of types in the pool, primitives included.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: primitives are present from the start.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items[idx.raw() as usize].tag
    }

    #[inline]
    pub fn data(&self, idx: Idx) -> u32 {
        self.items[idx.raw() as usize].data
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "pool tables are bounded by u32 indices"
    )]
    fn push(&mut self, tag: Tag, data: u32) -> Idx {
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(Item { tag, data });
        idx
    }

    /// Intern a one-child structural type.
    pub(crate) fn intern(&mut self, tag: Tag, data: u32) -> Idx {
        let item = Item { tag, data };
        if let Some(&idx) = self.interned.get(&item) {
            return idx;
        }
        let idx = self.push(tag, data);
        self.interned.insert(item, idx);
        idx
    }

    /// Intern a structural type whose payload lives in `extra`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pool tables are bounded by u32 indices"
    )]
    pub(crate) fn intern_complex(&mut self, tag: Tag, payload: &[u32]) -> Idx {
        let key = (tag, SmallVec::from_slice(payload));
        if let Some(&idx) = self.interned_complex.get(&key) {
            return idx;
        }
        let offset = self.extra.len() as u32;
        self.extra.extend_from_slice(payload);
        let idx = self.push(tag, offset);
        self.interned_complex.insert(key, idx);
        idx
    }

    /// Key and value types of a mapping item.
    pub(crate) fn mapping_parts(&self, idx: Idx) -> (Idx, Idx) {
        let offset = self.data(idx) as usize;
        (
            Idx::from_raw(self.extra[offset]),
            Idx::from_raw(self.extra[offset + 1]),
        )
    }

    /// Strip named layers. Every other type is its own underlying type.
    #[inline]
    pub fn underlying(&self, idx: Idx) -> Idx {
        match self.tag(idx) {
            Tag::Named => self.named[self.data(idx) as usize].underlying,
            _ => idx,
        }
    }

    /// Whether the type carries a name: primitives and nominal types do,
    /// structural types do not.
    #[inline]
    pub fn has_name(&self, idx: Idx) -> bool {
        !self.tag(idx).is_structural()
    }

    /// The record slot a record type points at.
    pub fn record_id(&self, idx: Idx) -> Option<RecordId> {
        match self.tag(idx) {
            Tag::Record => Some(RecordId(self.data(idx))),
            _ => None,
        }
    }

    /// Definition of a record; `None` while it is only declared.
    pub fn record_def(&self, id: RecordId) -> Option<&RecordDef> {
        self.records.get(id.index()).and_then(|slot| slot.def.as_ref())
    }

    pub fn record_name(&self, id: RecordId) -> &str {
        &self.records[id.index()].name
    }

    pub fn opaque_name(&self, id: OpaqueId) -> &str {
        &self.opaques[id.index()].name
    }

    /// A fresh zero value of an opaque type.
    pub fn opaque_zero(&self, id: OpaqueId) -> Box<dyn Opaque> {
        (self.opaques[id.index()].zero)()
    }
}
