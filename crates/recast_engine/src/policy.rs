//! Hook policy.

use bitflags::bitflags;

bitflags! {
    /// Which hook capabilities a transcoding call may use.
    ///
    /// Empty by default: opaque values are only ever assigned wholesale.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Policy: u8 {
        /// Ask opaque sources to extract a plain value.
        const EXTRACT = 1 << 0;
        /// Let opaque destinations scan the source.
        const SCAN = 1 << 1;
    }
}
