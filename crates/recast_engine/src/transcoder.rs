//! The transcoder and its recursive step.

use recast_stack::ensure_sufficient_stack;
use recast_types::{Idx, Pool, Shape};
use recast_value::{Dynamic, Value, ValueRef};

use crate::{Policy, TranscodeError};

/// Copies typed values into typed destinations.
///
/// ```text
/// let transcoder = Transcoder::new(&pool).with_policy(Policy::EXTRACT);
/// transcoder.transcode(&src, &mut dst)?;
/// ```
///
/// A transcoder only borrows its pool and is cheap to copy. Mismatched
/// shapes are skipped silently; see the crate docs.
#[derive(Copy, Clone, Debug)]
pub struct Transcoder<'p> {
    pub(crate) pool: &'p Pool,
    pub(crate) policy: Policy,
    pub(crate) verbose: bool,
}

impl<'p> Transcoder<'p> {
    pub fn new(pool: &'p Pool) -> Self {
        Transcoder {
            pool,
            policy: Policy::empty(),
            verbose: false,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Trace every decision at debug level.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn pool(&self) -> &'p Pool {
        self.pool
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Copy `src` into `dst`.
    pub fn transcode(&self, src: &Dynamic, dst: &mut Dynamic) -> Result<(), TranscodeError> {
        self.transcode_into(src.as_value_ref(), dst.ty, &mut dst.value)
    }

    /// Copy `src` into a bare value of type `dst_ty`.
    #[tracing::instrument(level = "debug", skip_all, fields(
        src = %self.pool.format_type(src.ty),
        dst = %self.pool.format_type(dst_ty)
    ))]
    pub fn transcode_into(
        &self,
        src: ValueRef<'_>,
        dst_ty: Idx,
        dst: &mut Value,
    ) -> Result<(), TranscodeError> {
        self.copy(Some(src), dst_ty, dst)
    }

    /// One recursive step. `None` is an absent source.
    pub(crate) fn copy(
        &self,
        src: Option<ValueRef<'_>>,
        dst_ty: Idx,
        dst: &mut Value,
    ) -> Result<(), TranscodeError> {
        ensure_sufficient_stack(|| self.copy_step(src, dst_ty, dst))
    }

    fn copy_step(
        &self,
        src: Option<ValueRef<'_>>,
        dst_ty: Idx,
        dst: &mut Value,
    ) -> Result<(), TranscodeError> {
        if self.needs_peel(src, dst_ty) {
            return self.peel(src, dst_ty, dst);
        }

        let Some(src) = src else {
            self.reset(dst_ty, dst);
            return Ok(());
        };
        if self.coerce(src, dst_ty, dst) {
            return Ok(());
        }
        if self.run_hooks(src, dst_ty, dst)? {
            return Ok(());
        }

        match self.pool.shape(dst_ty) {
            Shape::Record(id) => self.copy_record(src, id, dst),
            Shape::Sequence(elem) => self.copy_sequence(src, elem, dst),
            Shape::Mapping { key, value } => self.copy_mapping(src, key, value, dst),
            Shape::Scalar(_) | Shape::Indirect(_) => {
                decision!(
                    self,
                    src = %self.pool.format_type(src.ty),
                    dst = %self.pool.format_type(dst_ty),
                    "no rule applies; destination left as is"
                );
                Ok(())
            }
        }
    }
}
