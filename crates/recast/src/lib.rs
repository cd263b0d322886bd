//! Copy values between independently-evolving schemas.
//!
//! Describe both schemas in a [`Pool`], then [`transcode`] a typed source
//! into a typed destination. Records are matched field by field (by alias,
//! by reverse alias, then by name), sequences element by element, mappings
//! entry by entry with key conversion, and leaves are assigned or converted.
//!
//! ```text
//! let mut pool = Pool::new();
//! let row = pool.record("Row", vec![
//!     FieldDef::new("ID", Idx::INT64),
//!     FieldDef::new("Title", Idx::STR),
//! ])?;
//! let dto = pool.record("Dto", vec![
//!     FieldDef::new("ID", Idx::INT),
//!     FieldDef::new("Heading", Idx::STR).alias("Title"),
//! ])?;
//!
//! let src = Dynamic::new(row, Value::record(vec![Value::Int(1), Value::string("hi")]));
//! let mut dst = Dynamic::new(dto, pool.zero(dto));
//! recast::transcode(&pool, &src, &mut dst, Policy::empty())?;
//! ```
//!
//! # Partial copies
//!
//! Transcoding is best-effort. Whatever does not fit is skipped without an
//! error: a field with no source, a sequence copied from a non-sequence, a
//! mapping whose key types do not convert, a leaf that neither assigns nor
//! converts. A record with a private field is not written past that field.
//! An `Ok` result therefore does not mean everything was copied; inspect the
//! destination if that matters.
//!
//! The only errors are hook failures ([`TranscodeError`]), which abort the
//! whole call.
//!
//! # Logging
//!
//! [`Transcoder::with_verbose`] traces every decision as `tracing` debug
//! events. [`init_tracing`] installs a subscriber that honours `RUST_LOG`.

use std::sync::Once;

pub use recast_engine::{Policy, TranscodeError, Transcoder};
pub use recast_types::{
    FieldDef, FieldSource, FlatField, Idx, OpaqueId, Pool, RecordDef, RecordId, ScalarKind, Shape,
    Tag, TypeError, Visibility, ZeroFn,
};
pub use recast_value::{
    Dynamic, Extract, HookError, Key, Mapping, Opaque, OpaqueValue, Scan, Value, ValueRef,
};

/// Copy `src` into `dst` using the types in `pool`.
///
/// Shorthand for `Transcoder::new(pool).with_policy(policy).transcode(src, dst)`.
pub fn transcode(
    pool: &Pool,
    src: &Dynamic,
    dst: &mut Dynamic,
    policy: Policy,
) -> Result<(), TranscodeError> {
    Transcoder::new(pool).with_policy(policy).transcode(src, dst)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // another subscriber may already be installed by the host
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
