//! Domain Services
//!
//! Stateless content-generation logic shared by every adapter.
//! - Vocabulary / Substitution: placeholder resolution
//! - Corpus: validated post, comment and reply templates
//! - PersonaRegistry: synthetic authors
//! - ReplyPolicy: comment vs reply, and who answers
//! - FeedQuery: feed filtering and ordering

mod corpus;
mod feed;
mod registry;
mod reply_policy;
mod substitution;
mod vocabulary;

pub use corpus::*;
pub use feed::*;
pub use registry::*;
pub use reply_policy::*;
pub use substitution::*;
pub use vocabulary::*;
