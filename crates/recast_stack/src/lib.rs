//! Stack safety for the recursive transcoder.
//!
//! Transcoding recurses once per record field, sequence element, mapping
//! value and indirection layer, so the recursion depth follows the nesting
//! depth of the value being copied. Deeply nested values (long linked
//! chains, generated trees) can exceed the default thread stack; this crate
//! grows the stack on demand instead.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a new stack segment when the
//!   remaining space drops below the red zone.
//! - **WASM targets**: passthrough.

/// Minimum stack space to keep available (128KB red zone).
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing (2MB).
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn copy(&self, src: ValueRef<'_>, dst: &mut Value) -> Result<(), TranscodeError> {
///     ensure_sufficient_stack(|| self.copy_step(src, dst))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
