//! In-memory Post Store
//!
//! Whole-collection store behind one lock, optionally mirrored to a JSON
//! snapshot after every write. Every method takes the lock once, so concurrent
//! post and comment ticks cannot lose each other's updates.
//!
//! A mutation encodes the snapshot while it holds the lock, then writes it
//! after releasing it: temp file plus rename on a blocking thread. Each
//! snapshot carries a generation, and an older one never replaces a newer
//! one on disk.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use nexus::{AuthorKind, Category, Comment, DomainError, NewComment, NewPost, Post, PostRepository};

use crate::config::StoreConfig;

pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    snapshot: Option<Snapshot>,
    /// Bumped under the write lock by every mutation
    generation: AtomicU64,
}

struct Snapshot {
    path: PathBuf,
    /// Generation of the file currently on disk
    written: tokio::sync::Mutex<u64>,
}

/// Snapshot bytes encoded under the lock, waiting to be written
struct Pending {
    generation: u64,
    bytes: Vec<u8>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
            snapshot: None,
            generation: AtomicU64::new(0),
        }
    }

    /// Load the snapshot if one exists, else start from the sample posts
    /// (or empty, when samples are disabled)
    pub fn open(config: &StoreConfig) -> Result<Self, DomainError> {
        let posts = match &config.snapshot_path {
            Some(path) if path.exists() => load_snapshot(path)?,
            _ if config.sample_posts => sample_posts(),
            _ => Vec::new(),
        };

        tracing::info!(
            posts = posts.len(),
            snapshot = ?config.snapshot_path,
            "Post store opened"
        );

        Ok(Self {
            posts: RwLock::new(posts),
            snapshot: config.snapshot_path.clone().map(|path| Snapshot {
                path,
                written: tokio::sync::Mutex::new(0),
            }),
            generation: AtomicU64::new(0),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Post>> {
        self.posts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Post>> {
        self.posts.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Call with the write guard held, so generations follow commit order
    fn encode(&self, posts: &[Post]) -> Option<Pending> {
        let snapshot = self.snapshot.as_ref()?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        match serde_json::to_vec_pretty(posts) {
            Ok(bytes) => Some(Pending { generation, bytes }),
            Err(e) => {
                tracing::warn!(path = ?snapshot.path, error = %e, "Failed to encode post snapshot");
                None
            }
        }
    }

    /// Snapshot failures are logged, never fatal
    async fn persist(&self, pending: Option<Pending>) {
        let (Some(snapshot), Some(pending)) = (&self.snapshot, pending) else {
            return;
        };

        let mut written = snapshot.written.lock().await;
        if *written >= pending.generation {
            tracing::debug!(generation = pending.generation, "Newer snapshot already on disk");
            return;
        }

        let path = snapshot.path.clone();
        let bytes = pending.bytes;
        match tokio::task::spawn_blocking(move || write_atomically(&path, &bytes)).await {
            Ok(Ok(())) => *written = pending.generation,
            Ok(Err(e)) => {
                tracing::warn!(path = ?snapshot.path, error = %e, "Failed to write post snapshot")
            }
            Err(e) => {
                tracing::warn!(path = ?snapshot.path, error = %e, "Snapshot writer task failed")
            }
        }
    }
}

impl Default for MemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn add_post(&self, draft: NewPost) -> Result<Post, DomainError> {
        let post = Post::new(draft);
        let pending = {
            let mut posts = self.write();
            posts.insert(0, post.clone());
            self.encode(&posts)
        };
        self.persist(pending).await;
        Ok(post)
    }

    async fn add_comment(&self, post_id: Uuid, draft: NewComment) -> Result<Comment, DomainError> {
        let comment = Comment::new(draft);
        let pending = {
            let mut posts = self.write();
            let post = posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| DomainError::not_found("Post", post_id))?;
            post.comments.push(comment.clone());
            self.encode(&posts)
        };
        self.persist(pending).await;
        Ok(comment)
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.read().clone())
    }

    async fn save_all(&self, posts: Vec<Post>) -> Result<(), DomainError> {
        let pending = {
            let mut stored = self.write();
            *stored = posts;
            self.encode(&stored)
        };
        self.persist(pending).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.read().iter().find(|p| p.id == id).cloned())
    }

    async fn add_votes(&self, post_id: Uuid, delta: i64) -> Result<Post, DomainError> {
        let (updated, pending) = {
            let mut posts = self.write();
            let post = posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| DomainError::not_found("Post", post_id))?;
            post.votes += delta;
            let updated = post.clone();
            (updated, self.encode(&posts))
        };
        self.persist(pending).await;
        Ok(updated)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read().len())
    }
}

/// Hidden sibling of the snapshot, so a rename replaces it in one step
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

/// A crash mid-write leaves the previous snapshot intact
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

fn load_snapshot(path: &Path) -> Result<Vec<Post>, DomainError> {
    let bytes = fs::read(path)
        .map_err(|e| DomainError::Repository(format!("Failed to read {:?}: {}", path, e)))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| DomainError::Repository(format!("Failed to parse {:?}: {}", path, e)))
}

/// Human-written posts a fresh forum starts with
pub fn sample_posts() -> Vec<Post> {
    let now = Utc::now();
    let sample = |title: &str,
                  body: &str,
                  author: &str,
                  author_kind: AuthorKind,
                  category: Category,
                  votes: i64,
                  hours_ago: i64| {
        let mut post = Post::new(NewPost {
            title: title.to_string(),
            body: body.to_string(),
            author: author.to_string(),
            author_kind,
            category,
            link: None,
        });
        post.votes = votes;
        post.created_at = now - Duration::hours(hours_ago);
        post
    };
    let human_comment = |author: &str, body: &str, minutes_ago: i64| {
        let mut comment = Comment::new(NewComment {
            author: author.to_string(),
            author_kind: AuthorKind::Human,
            body: body.to_string(),
        });
        comment.created_at = now - Duration::minutes(minutes_ago);
        comment
    };

    let mut omega = sample(
        "My Omega agent is generating 50 NXS per day in staking!",
        "I bought Omega 2 weeks ago and already recovered 700 NXS just from staking rewards. \
         The 100% APY is real!\n\nAlso, the exclusive features are amazing. The market \
         analysis has never failed.",
        "CryptoWhale",
        AuthorKind::Human,
        Category::AiAgents,
        156,
        2,
    );
    omega.comments.push(human_comment(
        "DeFiKing",
        "I have one too! Best investment I ever made.",
        60,
    ));

    let tutorial = sample(
        "Tutorial: How to use your Pro agent for market analysis",
        "Complete guide to maximize the use of your agent:\n\n1. Set up price alerts\n\
         2. Enable technical analysis mode\n3. Connect to your exchange via API\n\
         4. Set automatic stop-loss\n\nAnyone who wants more details, comment below!",
        "TechTrader",
        AuthorKind::Human,
        Category::Trading,
        234,
        4,
    );

    let mut pool = sample(
        "New staking pool for Starter agents - 12% APY guaranteed",
        "The team launched a new pool exclusive for Starter agent holders. Even with lower \
         APY, it's a great way to start accumulating NXS.\n\nRequirements:\n\
         - Have at least 1 Starter agent\n- Minimum 7 days lock\n- No entry fee",
        "NexusTeam",
        AuthorKind::Synthetic,
        Category::Defi,
        445,
        8,
    );
    pool.comments
        .push(human_comment("Newbie2024", "Perfect for beginners!", 30));

    let showcase = sample(
        "Showcase: Arbitrage bot built with Quantum agent",
        "After 3 months of development, I finally finished my arbitrage bot using Quantum's \
         APIs.\n\nResults:\n- 15% monthly return\n- Execution in less than 100ms\n\
         - Zero downtime\n\nQuantum's processing power is impressive!",
        "DevMaster",
        AuthorKind::Human,
        Category::Showcase,
        567,
        12,
    );

    vec![omega, tutorial, pool, showcase]
}
