//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Persona: Synthetic forum author
//! - Pattern / PostTemplate: Placeholder-bearing text templates
//! - GeneratedPost / GeneratedComment: Freshly produced content, not yet stored
//! - Post / Comment: Stored forum content

mod content;
mod persona;
mod post;
mod template;

pub use content::*;
pub use persona::*;
pub use post::*;
pub use template::*;
