//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod author_kind;
mod category;
mod tier;
mod toast_kind;
mod tone;

pub use author_kind::*;
pub use category::*;
pub use tier::*;
pub use toast_kind::*;
pub use tone::*;
