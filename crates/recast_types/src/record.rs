//! Record metadata.
//!
//! A record is declared with a list of [`FieldDef`]s. When it is defined, the
//! pool flattens embedded records into a single member list and indexes it
//! once, so the transcoder never walks field declarations at copy time.
//!
//! # Field resolution
//!
//! For a destination field, the feeding source field is chosen by
//! [`RecordDef::source_for`] on the *source* record:
//!
//! 1. the destination field's explicit alias, if it has one;
//! 2. a source field that declares it feeds the destination field;
//! 3. the source field with the same name.
//!
//! Name lookup follows promotion rules: the shallowest match wins, and two
//! matches at the same depth hide each other.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use recast_value::Value;

use crate::{Idx, Pool, Shape, TypeError};

/// Whether the transcoder may write a field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    /// Never written; a record with a private field is left untouched.
    Private,
}

/// Declared field of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: Idx,
    /// Copy from the source field with this name.
    pub alias: Option<String>,
    /// Reverse alias: this field feeds the destination field with this name.
    pub feeds: Option<String>,
    /// Flatten the fields of this record-typed field into the parent.
    pub embedded: bool,
    pub visibility: Visibility,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: Idx) -> Self {
        FieldDef {
            name: name.into(),
            ty,
            alias: None,
            feeds: None,
            embedded: false,
            visibility: Visibility::Public,
        }
    }

    #[must_use]
    pub fn alias(mut self, source: impl Into<String>) -> Self {
        self.alias = Some(source.into());
        self
    }

    #[must_use]
    pub fn feeds(mut self, target: impl Into<String>) -> Self {
        self.feeds = Some(target.into());
        self
    }

    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }
}

/// One step from a record value to one of its members.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Field position in the record value.
    pub index: usize,
    /// Set when the field is an embedded indirection: the pointee record type,
    /// which must be dereferenced to continue the path.
    pub through: Option<Idx>,
}

/// A member of a record after flattening embedded records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatField {
    pub name: String,
    pub ty: Idx,
    pub alias: Option<String>,
    pub feeds: Option<String>,
    pub writable: bool,
    /// An embedded record itself rather than one of its leaves.
    pub embedded: bool,
    path: SmallVec<[Step; 2]>,
}

impl FlatField {
    pub fn path(&self) -> &[Step] {
        &self.path
    }

    /// Zero for fields declared directly on the record.
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Read this member out of a record value.
    ///
    /// `None` when the value has the wrong shape or the path crosses an empty
    /// embedded indirection.
    pub fn read<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        let (last, init) = self.path.split_last()?;
        let mut cur = record;
        for step in init {
            let field = cur.as_record()?.get(step.index)?;
            cur = match step.through {
                Some(_) => field.deref()?,
                None => field,
            };
        }
        cur.as_record()?.get(last.index)
    }

    /// Locate this member in a record value for writing, allocating empty
    /// embedded indirections on the way.
    pub fn write<'v>(&self, pool: &Pool, record: &'v mut Value) -> Option<&'v mut Value> {
        let (last, init) = self.path.split_last()?;
        let mut cur = record;
        for step in init {
            let field = cur.as_record_mut()?.get_mut(step.index)?;
            cur = match step.through {
                Some(pointee) => field.materialize_with(|| pool.zero(pointee))?,
                None => field,
            };
        }
        cur.as_record_mut()?.get_mut(last.index)
    }
}

/// Which rule picked a source field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldSource {
    Alias,
    ReverseAlias,
    Name,
}

/// A defined record.
#[derive(Clone, Debug)]
pub struct RecordDef {
    name: String,
    fields: Vec<FieldDef>,
    /// Every member in depth-first declaration order, embedded records
    /// included.
    members: Vec<FlatField>,
    by_name: FxHashMap<String, usize>,
    feeders: FxHashMap<String, usize>,
}

impl RecordDef {
    pub(crate) fn build(
        pool: &Pool,
        name: String,
        fields: Vec<FieldDef>,
    ) -> Result<RecordDef, TypeError> {
        let mut seen = FxHashSet::default();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(TypeError::DuplicateField {
                    record: name,
                    field: field.name.clone(),
                });
            }
            if let Some(used) = undefined_dependency(pool, field) {
                return Err(TypeError::UndefinedRecord { record: name, used });
            }
        }

        let mut members = Vec::new();
        flatten(pool, &fields, &[], &mut members);

        let by_name = index_by_name(&members);
        let mut feeders = FxHashMap::default();
        for (i, member) in members.iter().enumerate() {
            if let Some(target) = &member.feeds {
                feeders.insert(target.clone(), i);
            }
        }

        Ok(RecordDef {
            name,
            fields,
            members,
            by_name,
            feeders,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields as declared.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// All members, embedded records included.
    pub fn members(&self) -> &[FlatField] {
        &self.members
    }

    /// The fields a destination copy visits: every member that is not itself
    /// an embedded record, in depth-first declaration order.
    pub fn flat_fields(&self) -> impl Iterator<Item = &FlatField> {
        self.members.iter().filter(|m| !m.embedded)
    }

    /// Shallowest unambiguous member with this name.
    pub fn field_by_name(&self, name: &str) -> Option<&FlatField> {
        self.by_name.get(name).map(|&i| &self.members[i])
    }

    /// The last member that declares it feeds `target`.
    pub fn feeder(&self, target: &str) -> Option<&FlatField> {
        self.feeders.get(target).map(|&i| &self.members[i])
    }

    /// Pick the member of this (source) record that feeds `dst`.
    ///
    /// An explicit alias on `dst` is final: if it names nothing here, nothing
    /// feeds `dst`.
    pub fn source_for(&self, dst: &FlatField) -> Option<(&FlatField, FieldSource)> {
        if let Some(alias) = &dst.alias {
            return self.field_by_name(alias).map(|f| (f, FieldSource::Alias));
        }
        if let Some(f) = self.feeder(&dst.name) {
            return Some((f, FieldSource::ReverseAlias));
        }
        self.field_by_name(&dst.name).map(|f| (f, FieldSource::Name))
    }
}

/// A record the field needs defined before its owner can be: one held by
/// value, or one embedded behind an indirection.
fn undefined_dependency(pool: &Pool, field: &FieldDef) -> Option<String> {
    let needed = match pool.shape(field.ty) {
        Shape::Record(id) => Some(id),
        Shape::Indirect(elem) if field.embedded => match pool.shape(elem) {
            Shape::Record(id) => Some(id),
            _ => None,
        },
        _ => None,
    }?;
    match pool.record_def(needed) {
        Some(_) => None,
        None => Some(pool.record_name(needed).to_owned()),
    }
}

/// The record an embedded field flattens, and the pointee type when it is
/// reached through an indirection.
fn embedded_target<'p>(
    pool: &'p Pool,
    field: &FieldDef,
) -> Option<(&'p RecordDef, Option<Idx>)> {
    if !field.embedded {
        return None;
    }
    match pool.shape(field.ty) {
        Shape::Record(id) => pool.record_def(id).map(|def| (def, None)),
        Shape::Indirect(elem) => match pool.shape(elem) {
            Shape::Record(id) => pool.record_def(id).map(|def| (def, Some(elem))),
            _ => None,
        },
        _ => None,
    }
}

fn flatten(pool: &Pool, fields: &[FieldDef], prefix: &[Step], out: &mut Vec<FlatField>) {
    for (index, field) in fields.iter().enumerate() {
        let target = embedded_target(pool, field);
        let mut path: SmallVec<[Step; 2]> = SmallVec::from_slice(prefix);
        path.push(Step {
            index,
            through: target.and_then(|(_, through)| through),
        });
        out.push(FlatField {
            name: field.name.clone(),
            ty: field.ty,
            alias: field.alias.clone(),
            feeds: field.feeds.clone(),
            writable: field.visibility == Visibility::Public,
            embedded: target.is_some(),
            path: path.clone(),
        });
        if let Some((def, _)) = target {
            flatten(pool, def.fields(), &path, out);
        }
    }
}

fn index_by_name(members: &[FlatField]) -> FxHashMap<String, usize> {
    // name -> (depth, member); `None` marks a same-depth collision
    let mut best: FxHashMap<&str, (usize, Option<usize>)> = FxHashMap::default();
    for (i, member) in members.iter().enumerate() {
        let depth = member.depth();
        let entry = best.entry(member.name.as_str()).or_insert((depth, Some(i)));
        if depth < entry.0 {
            *entry = (depth, Some(i));
        } else if depth == entry.0 && entry.1 != Some(i) {
            entry.1 = None;
        }
    }
    best.into_iter()
        .filter_map(|(name, (_, member))| member.map(|i| (name.to_owned(), i)))
        .collect()
}
