//! Feed Queries - Filtering and ordering of the post list

use serde::{Deserialize, Serialize};

use crate::domain::entities::Post;
use crate::domain::value_objects::Category;

/// Number of posts in the trending sidebar
pub const TRENDING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Newest first
    #[default]
    New,
    /// Most votes first
    Top,
    /// Most comments first
    Discussed,
}

/// Feed filter and sort options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Case-insensitive substring over title and body
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub sort: FeedSort,
}

impl FeedQuery {
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut posts: Vec<Post> = posts
            .into_iter()
            .filter(|post| self.category.map_or(true, |c| post.category == c))
            .filter(|post| match &needle {
                Some(needle) => {
                    post.title.to_lowercase().contains(needle)
                        || post.body.to_lowercase().contains(needle)
                }
                None => true,
            })
            .collect();

        // Stable sorts keep store order among ties.
        match self.sort {
            FeedSort::New => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            FeedSort::Top => posts.sort_by(|a, b| b.votes.cmp(&a.votes)),
            FeedSort::Discussed => posts.sort_by(|a, b| b.comments.len().cmp(&a.comments.len())),
        }
        posts
    }
}

/// The `limit` highest-voted posts
pub fn trending(posts: &[Post], limit: usize) -> Vec<Post> {
    let mut ranked = posts.to_vec();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
    ranked.truncate(limit);
    ranked
}
