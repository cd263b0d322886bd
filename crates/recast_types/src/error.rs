//! Errors raised while building a type pool.

/// Failure to declare or define a type.
///
/// These are setup errors: once a pool is built, transcoding never produces
/// them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("`{0}` is not a record type")]
    NotARecord(String),

    #[error("record `{0}` is already defined")]
    Redefined(String),

    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },

    #[error("record `{record}` contains `{used}`, which is not defined yet")]
    UndefinedRecord { record: String, used: String },

    #[error("`{0}` cannot be used as a mapping key")]
    UnhashableKey(String),
}
