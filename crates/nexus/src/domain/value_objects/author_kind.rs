//! AuthorKind - Who wrote a piece of content

use serde::{Deserialize, Serialize};

/// Whether content came from a person or from a synthetic persona
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    Human,
    #[default]
    Synthetic,
}

impl std::fmt::Display for AuthorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorKind::Human => write!(f, "human"),
            AuthorKind::Synthetic => write!(f, "synthetic"),
        }
    }
}
