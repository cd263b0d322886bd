//! Leaf assignment and conversion.

use recast_types::Idx;
use recast_value::{Value, ValueRef};

use crate::Transcoder;

impl Transcoder<'_> {
    /// Absent source: the destination becomes the zero value of its type.
    pub(crate) fn reset(&self, dst_ty: Idx, dst: &mut Value) {
        decision!(
            self,
            dst = %self.pool.format_type(dst_ty),
            "absent source; destination reset to zero"
        );
        *dst = self.pool.zero(dst_ty);
    }

    /// Assign or convert. Returns whether the pair was handled.
    pub(crate) fn coerce(&self, src: ValueRef<'_>, dst_ty: Idx, dst: &mut Value) -> bool {
        if self.pool.assignable(src.ty, dst_ty) {
            decision!(
                self,
                src = %self.pool.format_type(src.ty),
                dst = %self.pool.format_type(dst_ty),
                "assign"
            );
            *dst = if src.ty == dst_ty {
                src.value.clone()
            } else {
                // identical underlying types, or a `dyn` slot
                self.pool
                    .convert(src, dst_ty)
                    .unwrap_or_else(|| src.value.clone())
            };
            return true;
        }

        if self.pool.convertible(src.ty, dst_ty) {
            match self.pool.convert(src, dst_ty) {
                Some(value) => {
                    decision!(
                        self,
                        src = %self.pool.format_type(src.ty),
                        dst = %self.pool.format_type(dst_ty),
                        "convert"
                    );
                    *dst = value;
                }
                None => decision!(
                    self,
                    src = %self.pool.format_type(src.ty),
                    value = src.value.kind_name(),
                    "value does not match its type; skipped"
                ),
            }
            return true;
        }

        false
    }
}
