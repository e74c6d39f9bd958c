//! Generated content - produced by the engine, then handed to the store
//!
//! The engine keeps no reference to these once they are stored.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AuthorKind, Category};

/// A freshly generated top-level post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub author_kind: AuthorKind,
    pub category: Category,
}

/// A freshly generated comment or reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedComment {
    pub author_name: String,
    pub author_kind: AuthorKind,
    pub body: String,
}

impl GeneratedComment {
    pub fn synthetic(author_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            author_kind: AuthorKind::Synthetic,
            body: body.into(),
        }
    }
}
