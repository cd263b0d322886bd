//! Record copy.

use recast_types::{RecordId, Shape};
use recast_value::{Value, ValueRef};

use crate::{TranscodeError, Transcoder};

impl Transcoder<'_> {
    /// Copy field by field into a record.
    ///
    /// Visits the destination's flattened fields in order. A private field
    /// stops the copy on the spot, keeping fields written before it. A field
    /// nothing feeds keeps its value.
    pub(crate) fn copy_record(
        &self,
        src: ValueRef<'_>,
        dst_id: RecordId,
        dst: &mut Value,
    ) -> Result<(), TranscodeError> {
        let Some(dst_def) = self.pool.record_def(dst_id) else {
            return Ok(());
        };
        let src_def = match self.pool.shape(src.ty) {
            Shape::Record(id) => self.pool.record_def(id),
            _ => None,
        };

        for field in dst_def.flat_fields() {
            if !field.writable {
                decision!(
                    self,
                    record = dst_def.name(),
                    field = %field.name,
                    "field not writable; record copy stopped"
                );
                return Ok(());
            }
            let Some(src_def) = src_def else {
                decision!(
                    self,
                    src = %self.pool.format_type(src.ty),
                    record = dst_def.name(),
                    "source is not a record; nothing copied"
                );
                return Ok(());
            };
            let Some((src_field, how)) = src_def.source_for(field) else {
                decision!(self, field = %field.name, "no source field; skipped");
                continue;
            };
            decision!(
                self,
                field = %field.name,
                from = %src_field.name,
                how = ?how,
                "field"
            );
            let Some(src_value) = src_field.read(src.value) else {
                continue;
            };
            let src_value = ValueRef::new(src_field.ty, src_value);
            if matches!(self.pool.shape(field.ty), Shape::Indirect(_))
                && self.peels_to_absent(src_value)
            {
                // embedded indirections on the path stay unallocated
                decision!(self, field = %field.name, "absent source; indirect field left as is");
                continue;
            }
            let Some(dst_value) = field.write(self.pool, dst) else {
                continue;
            };
            self.copy(Some(src_value), field.ty, dst_value)?;
        }
        Ok(())
    }
}
