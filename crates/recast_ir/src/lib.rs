//! Shared identifiers for the recast transcoder.
//!
//! Kept dependency-free so both the value layer and the type layer can
//! refer to type handles without depending on each other.

mod idx;

pub use idx::Idx;

/// Compile-time assertion that a type has a specific size.
///
/// Used to keep frequently-copied handles small.
///
/// ```text
/// static_assert_size!(Idx, 4);
/// ```
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}
