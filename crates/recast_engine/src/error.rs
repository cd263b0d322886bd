//! Transcoding errors.

use recast_value::HookError;

/// A hook failed. The whole transcoding call stops at the first failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranscodeError {
    #[error("recast: extracting a value from `{ty}` failed: {source}")]
    Extract { ty: String, source: HookError },

    #[error("recast: scanning into `{ty}` failed: {source}")]
    Scan { ty: String, source: HookError },
}

impl TranscodeError {
    /// The error reported by the hook.
    pub fn hook_error(&self) -> &HookError {
        match self {
            TranscodeError::Extract { source, .. } | TranscodeError::Scan { source, .. } => source,
        }
    }
}
