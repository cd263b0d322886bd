//! Type construction.

use super::{NamedDef, OpaqueDef, RecordSlot, ZeroFn};
use crate::{FieldDef, Idx, Pool, RecordDef, Shape, Tag, TypeError};

impl Pool {
    // === Structural Constructors ===

    /// Create an optional reference type `*elem`.
    pub fn indirect(&mut self, elem: Idx) -> Idx {
        self.intern(Tag::Indirect, elem.raw())
    }

    /// Create a sequence type `[]elem`.
    pub fn sequence(&mut self, elem: Idx) -> Idx {
        self.intern(Tag::Sequence, elem.raw())
    }

    /// Create a mapping type `map[key]value`.
    ///
    /// Keys must be hashable scalars: booleans, integers, strings or bytes,
    /// possibly under a name.
    pub fn mapping(&mut self, key: Idx, value: Idx) -> Result<Idx, TypeError> {
        match self.shape(key) {
            Shape::Scalar(kind) if kind.is_hashable() => {}
            _ => return Err(TypeError::UnhashableKey(self.format_type(key))),
        }
        Ok(self.intern_complex(Tag::Mapping, &[key.raw(), value.raw()]))
    }

    // === Nominal Constructors ===

    /// Create a distinct named type over `underlying`.
    ///
    /// Naming a named type names its underlying type, so `underlying` is
    /// always structural, primitive, a record or an opaque type.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pool tables are bounded by u32 indices"
    )]
    pub fn named(&mut self, name: impl Into<String>, underlying: Idx) -> Idx {
        let underlying = self.underlying(underlying);
        let slot = self.named.len() as u32;
        self.named.push(NamedDef {
            name: name.into(),
            underlying,
        });
        self.push(Tag::Named, slot)
    }

    /// Register an opaque host type.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pool tables are bounded by u32 indices"
    )]
    pub fn opaque(&mut self, name: impl Into<String>, zero: ZeroFn) -> Idx {
        let slot = self.opaques.len() as u32;
        self.opaques.push(OpaqueDef {
            name: name.into(),
            zero,
        });
        self.push(Tag::Opaque, slot)
    }

    /// Reserve a record type without fields.
    ///
    /// Declaring first lets a record refer to itself (or to a record declared
    /// later) through an indirection, a sequence or a mapping.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pool tables are bounded by u32 indices"
    )]
    pub fn declare_record(&mut self, name: impl Into<String>) -> Idx {
        let slot = self.records.len() as u32;
        self.records.push(RecordSlot {
            name: name.into(),
            def: None,
        });
        self.push(Tag::Record, slot)
    }

    /// Give a declared record its fields.
    ///
    /// Any record contained by value, or embedded, must already be defined.
    /// This rules out records that contain themselves.
    pub fn define_record(&mut self, idx: Idx, fields: Vec<FieldDef>) -> Result<(), TypeError> {
        let Some(id) = self.record_id(idx) else {
            return Err(TypeError::NotARecord(self.format_type(idx)));
        };
        let slot = id.raw() as usize;
        if self.records[slot].def.is_some() {
            return Err(TypeError::Redefined(self.records[slot].name.clone()));
        }
        let def = RecordDef::build(self, self.records[slot].name.clone(), fields)?;
        self.records[slot].def = Some(def);
        Ok(())
    }

    /// Declare and define a record in one step.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDef>,
    ) -> Result<Idx, TypeError> {
        let idx = self.declare_record(name);
        self.define_record(idx, fields)?;
        Ok(idx)
    }
}
