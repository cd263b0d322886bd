//! Hook dispatch.
//!
//! Consulted only when leaf coercion found nothing. Extraction on the source
//! wins over scanning into the destination.

use recast_types::Idx;
use recast_value::{Dynamic, Value, ValueRef};

use crate::{Policy, TranscodeError, Transcoder};

impl Transcoder<'_> {
    /// Returns whether a hook handled the pair.
    pub(crate) fn run_hooks(
        &self,
        src: ValueRef<'_>,
        dst_ty: Idx,
        dst: &mut Value,
    ) -> Result<bool, TranscodeError> {
        if self.policy.contains(Policy::EXTRACT) {
            if let Some(extract) = src.value.as_opaque().and_then(|o| o.get().as_extract()) {
                let extracted = extract.extract().map_err(|source| TranscodeError::Extract {
                    ty: self.pool.format_type(src.ty),
                    source,
                })?;
                decision!(
                    self,
                    src = %self.pool.format_type(src.ty),
                    extracted = ?extracted.as_ref().map(|d| self.pool.format_type(d.ty)),
                    "extract"
                );
                self.copy(extracted.as_ref().map(Dynamic::as_value_ref), dst_ty, dst)?;
                return Ok(true);
            }
        }

        if self.policy.contains(Policy::SCAN) {
            if let Some(scan) = dst.as_opaque_mut().and_then(|o| o.get_mut().as_scan()) {
                decision!(
                    self,
                    src = %self.pool.format_type(src.ty),
                    dst = %self.pool.format_type(dst_ty),
                    "scan"
                );
                scan.scan(src).map_err(|source| TranscodeError::Scan {
                    ty: self.pool.format_type(dst_ty),
                    source,
                })?;
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests;
