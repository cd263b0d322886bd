//! Runtime values for the recast transcoder.
//!
//! A [`Value`] is untyped data; its meaning comes from the type handle
//! ([`Idx`]) that accompanies it. [`Dynamic`] and [`ValueRef`] pair the two,
//! the former owning its value, the latter borrowing it.
//!
//! Host types that the transcoder cannot look inside are carried as
//! [`Value::Opaque`]. They may opt into the two hook capabilities,
//! [`Extract`] and [`Scan`], which the engine queries at the call site.

mod dynamic;
mod key;
mod opaque;
mod value;

pub use dynamic::{Dynamic, ValueRef};
pub use key::Key;
pub use opaque::{Extract, HookError, Opaque, OpaqueObject, OpaqueValue, Scan};
pub use recast_ir::Idx;
pub use value::{Mapping, Value};
