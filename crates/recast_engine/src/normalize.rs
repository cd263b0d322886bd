//! Indirection normalization.
//!
//! One layer comes off each side per step, so `***T` takes three steps to
//! reach `T`. On the source side a `dyn` slot counts as a layer: its content
//! continues with its own dynamic type.

use recast_types::{Idx, ScalarKind, Shape};
use recast_value::{Dynamic, Value, ValueRef};

use crate::{TranscodeError, Transcoder};

impl Transcoder<'_> {
    pub(crate) fn needs_peel(&self, src: Option<ValueRef<'_>>, dst_ty: Idx) -> bool {
        matches!(self.pool.shape(dst_ty), Shape::Indirect(_))
            || src.is_some_and(|src| self.is_source_layer(src.ty))
    }

    pub(crate) fn peel(
        &self,
        src: Option<ValueRef<'_>>,
        dst_ty: Idx,
        dst: &mut Value,
    ) -> Result<(), TranscodeError> {
        let src = src.and_then(|src| self.peel_source(src));

        let Shape::Indirect(elem) = self.pool.shape(dst_ty) else {
            return self.copy(src, dst_ty, dst);
        };
        let Some(src) = src else {
            decision!(
                self,
                dst = %self.pool.format_type(dst_ty),
                "absent source; indirect destination left as is"
            );
            return Ok(());
        };
        let Some(target) = dst.materialize_with(|| self.pool.zero(elem)) else {
            return Ok(());
        };
        self.copy(Some(src), elem, target)
    }

    /// Whether peeling `src` leaves nothing. An indirect destination stays
    /// untouched for such a source.
    pub(crate) fn peels_to_absent(&self, src: ValueRef<'_>) -> bool {
        self.is_source_layer(src.ty) && self.peel_source(src).is_none()
    }

    fn is_source_layer(&self, ty: Idx) -> bool {
        matches!(
            self.pool.shape(ty),
            Shape::Indirect(_) | Shape::Scalar(ScalarKind::Dyn)
        )
    }

    /// Remove one layer from the source. `None` when the layer is empty.
    fn peel_source<'s>(&self, src: ValueRef<'s>) -> Option<ValueRef<'s>> {
        match self.pool.shape(src.ty) {
            Shape::Indirect(elem) => src.value.deref().map(|inner| ValueRef::new(elem, inner)),
            Shape::Scalar(ScalarKind::Dyn) => src.value.as_dyn().map(Dynamic::as_value_ref),
            _ => Some(src),
        }
    }
}
