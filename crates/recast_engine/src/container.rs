//! Sequence and mapping copy.

use recast_types::{Idx, Shape};
use recast_value::{Key, Value, ValueRef};

use crate::{TranscodeError, Transcoder};

impl Transcoder<'_> {
    /// Copy element by element. The destination grows to the source's length
    /// and never shrinks.
    pub(crate) fn copy_sequence(
        &self,
        src: ValueRef<'_>,
        elem: Idx,
        dst: &mut Value,
    ) -> Result<(), TranscodeError> {
        let Shape::Sequence(src_elem) = self.pool.shape(src.ty) else {
            decision!(
                self,
                src = %self.pool.format_type(src.ty),
                "source is not a sequence; nothing copied"
            );
            return Ok(());
        };
        let (Some(items), Some(targets)) = (src.value.as_sequence(), dst.as_sequence_mut()) else {
            return Ok(());
        };

        for (i, item) in items.iter().enumerate() {
            if i == targets.len() {
                decision!(self, len = i + 1, "destination sequence grown");
                targets.push(self.pool.zero(elem));
            }
            self.copy(Some(ValueRef::new(src_elem, item)), elem, &mut targets[i])?;
        }
        Ok(())
    }

    /// Copy entry by entry.
    ///
    /// An absent destination mapping is created first, whatever the source.
    /// Keys are assigned or converted to the destination key type; if the key
    /// types are incompatible the copy stops. Every value is built from the
    /// zero value of the destination value type.
    pub(crate) fn copy_mapping(
        &self,
        src: ValueRef<'_>,
        key_ty: Idx,
        value_ty: Idx,
        dst: &mut Value,
    ) -> Result<(), TranscodeError> {
        let Some(entries) = dst.materialize_mapping() else {
            return Ok(());
        };
        let Shape::Mapping {
            key: src_key_ty,
            value: src_value_ty,
        } = self.pool.shape(src.ty)
        else {
            decision!(
                self,
                src = %self.pool.format_type(src.ty),
                "source is not a mapping; nothing copied"
            );
            return Ok(());
        };
        let Some(src_entries) = src.value.as_mapping() else {
            return Ok(());
        };

        let assign = self.pool.assignable(src_key_ty, key_ty);
        let convert = self.pool.convertible(src_key_ty, key_ty);

        for (src_key, src_value) in src_entries {
            let key = if assign {
                src_key.clone()
            } else if convert {
                let converted = self
                    .pool
                    .convert(ValueRef::new(src_key_ty, &src_key.to_value()), key_ty)
                    .and_then(Key::from_value);
                let Some(key) = converted else {
                    decision!(self, key = %src_key, "key did not convert; mapping copy stopped");
                    return Ok(());
                };
                key
            } else {
                decision!(
                    self,
                    src = %self.pool.format_type(src_key_ty),
                    dst = %self.pool.format_type(key_ty),
                    "incompatible key types; mapping copy stopped"
                );
                return Ok(());
            };

            let mut scratch = self.pool.zero(value_ty);
            self.copy(
                Some(ValueRef::new(src_value_ty, src_value)),
                value_ty,
                &mut scratch,
            )?;
            entries.insert(key, scratch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
