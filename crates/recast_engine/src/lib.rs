//! Recursive transcoding engine.
//!
//! [`Transcoder`] copies a typed source value into a typed destination value,
//! one location at a time. Each recursive step runs the same pipeline:
//!
//! 1. **Normalize**: peel one indirection (or `dyn` slot) from the source and
//!    one indirection from the destination, allocating an empty destination
//!    wrapper before writing through it.
//! 2. **Coerce**: assign, reset to zero, or convert when the leaf types allow.
//! 3. **Hooks**: let an opaque source extract a simpler value, or an opaque
//!    destination scan the source, if the [`Policy`] enables it.
//! 4. **Structural copy**: records field by field, sequences element by
//!    element, mappings entry by entry.
//!
//! # Silent skips
//!
//! Shape mismatches are not errors. A source that does not fit the
//! destination leaves the destination (or the affected part of it) as it
//! was, and the call still returns `Ok`. The only failures are hook
//! failures, reported as [`TranscodeError`].

/// Emit a `tracing` debug event when the transcoder runs verbosely.
macro_rules! decision {
    ($transcoder:expr, $($arg:tt)+) => {
        if $transcoder.verbose {
            tracing::debug!($($arg)+);
        }
    };
}

mod container;
mod error;
mod hooks;
mod normalize;
mod policy;
mod record;
mod scalar;
mod transcoder;

pub use error::TranscodeError;
pub use policy::Policy;
pub use transcoder::Transcoder;
