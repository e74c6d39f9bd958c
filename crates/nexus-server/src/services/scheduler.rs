//! Scheduler Service - Keeps the forum looking alive
//!
//! Seeds a sparse store, then runs two independent cadences until stopped:
//! one writes posts, the other writes comments and replies. Each cadence
//! sleeps a freshly sampled delay between ticks.
//!
//! Every run owns a `CancellationToken`. `stop()` cancels it before
//! returning, and each cycle checks it before starting and again before
//! committing, so nothing is written after a stop. A remote call that is in
//! flight at that moment finishes, and its result is discarded.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use nexus::{
    Comment, DomainError, Engagement, ForumUi, LlmProvider, Post, PostRepository, ReplyPolicy,
    ToastKind,
};

use crate::application::{ContentGenerator, SharedRng};
use crate::config::ConfigError;

/// Closed interval `[min, max]`, written as `[min, max]` in TOML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window(pub u64, pub u64);

impl Window {
    pub fn min(&self) -> u64 {
        self.0
    }

    pub fn max(&self) -> u64 {
        self.1
    }

    pub fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> u64 {
        rng.gen_range(self.0..=self.1.max(self.0))
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.0 > self.1 {
            return Err(ConfigError::InvalidWindow {
                name,
                min: self.0,
                max: self.1,
            });
        }
        Ok(())
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Start the scheduler when the server starts
    pub autostart: bool,
    /// Seed when the store holds fewer posts than this
    pub seed_threshold: usize,
    /// Posts written by one seeding
    pub seed_batch: usize,
    pub seed_comments: Window,
    pub seed_votes: Window,
    /// Initial votes of a scheduled post
    pub post_votes: Window,
    /// Votes added by a bump
    pub vote_bump: Window,
    pub post_interval_secs: Window,
    pub comment_interval_secs: Window,
    /// Delay before the first comment tick
    pub comment_kickoff_secs: u64,
    pub fresh_comment_probability: f64,
    pub vote_bump_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            autostart: true,
            seed_threshold: 6,
            seed_batch: 4,
            seed_comments: Window(1, 4),
            seed_votes: Window(20, 500),
            post_votes: Window(5, 150),
            vote_bump: Window(1, 10),
            post_interval_secs: Window(25, 50),
            comment_interval_secs: Window(12, 24),
            comment_kickoff_secs: 8,
            fresh_comment_probability: 0.6,
            vote_bump_probability: 0.5,
            rng_seed: None,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.seed_comments.check("seed_comments")?;
        self.seed_votes.check("seed_votes")?;
        self.post_votes.check("post_votes")?;
        self.vote_bump.check("vote_bump")?;
        self.post_interval_secs.check("post_interval_secs")?;
        self.comment_interval_secs.check("comment_interval_secs")?;

        if self.post_interval_secs.min() == 0 {
            return Err(ConfigError::Zero("post_interval_secs"));
        }
        if self.comment_interval_secs.min() == 0 {
            return Err(ConfigError::Zero("comment_interval_secs"));
        }
        if self.comment_interval_secs.max() >= self.post_interval_secs.min() {
            return Err(ConfigError::CadenceOverlap {
                comment_min: self.comment_interval_secs.min(),
                comment_max: self.comment_interval_secs.max(),
                post_min: self.post_interval_secs.min(),
                post_max: self.post_interval_secs.max(),
            });
        }

        for (name, value) in [
            ("fresh_comment_probability", self.fresh_comment_probability),
            ("vote_bump_probability", self.vote_bump_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

/// Result of one comment tick
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    pub post_id: Uuid,
    pub comment: Comment,
    /// Author replied to, for replies
    pub addressee: Option<String>,
}

/// Content scheduler with start/stop lifecycle
pub struct ContentScheduler<R: PostRepository, U: ForumUi, L: LlmProvider> {
    engine: Arc<Engine<R, U, L>>,
    run: Mutex<Option<Run>>,
}

struct Run {
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

struct Engine<R: PostRepository, U: ForumUi, L: LlmProvider> {
    repo: Arc<R>,
    ui: Arc<U>,
    generator: ContentGenerator<L>,
    policy: ReplyPolicy,
    config: SchedulerConfig,
    rng: Arc<SharedRng>,
}

impl<R, U, L> ContentScheduler<R, U, L>
where
    R: PostRepository + 'static,
    U: ForumUi + 'static,
    L: LlmProvider + 'static,
{
    /// `rng` should be the same source the generator draws from, so one
    /// seed reproduces a whole run. An invalid `config` is rejected here,
    /// before any cadence can trip over it.
    pub fn new(
        repo: Arc<R>,
        ui: Arc<U>,
        generator: ContentGenerator<L>,
        rng: Arc<SharedRng>,
        config: SchedulerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let policy = ReplyPolicy::new(config.fresh_comment_probability);
        Ok(Self {
            engine: Arc::new(Engine {
                repo,
                ui,
                generator,
                policy,
                config,
                rng,
            }),
            run: Mutex::new(None),
        })
    }

    pub fn generator(&self) -> &ContentGenerator<L> {
        &self.engine.generator
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.engine.config
    }

    pub fn is_running(&self) -> bool {
        self.lock_run().is_some()
    }

    /// Seed if sparse, then start both cadences. Returns `false` when
    /// already running.
    pub async fn start(&self) -> Result<bool, DomainError> {
        let token = {
            let mut run = self.lock_run();
            if run.is_some() {
                tracing::debug!("Content scheduler already running");
                return Ok(false);
            }
            let token = CancellationToken::new();
            *run = Some(Run {
                token: token.clone(),
                tasks: Vec::new(),
            });
            token
        };

        if let Err(e) = self.engine.seed_if_sparse(&token).await {
            tracing::warn!(error = %e, "Seeding failed, starting anyway");
        }

        let mut run = self.lock_run();
        match run.as_mut() {
            // A stop (and maybe a new start) happened while seeding.
            _ if token.is_cancelled() => return Ok(false),
            None => return Ok(false),
            Some(current) => {
                current
                    .tasks
                    .push(tokio::spawn(post_cadence(self.engine.clone(), token.clone())));
                current
                    .tasks
                    .push(tokio::spawn(comment_cadence(self.engine.clone(), token)));
            }
        }

        tracing::info!(
            "📅 Content scheduler started (posts every {}-{}s, comments every {}-{}s)",
            self.engine.config.post_interval_secs.min(),
            self.engine.config.post_interval_secs.max(),
            self.engine.config.comment_interval_secs.min(),
            self.engine.config.comment_interval_secs.max(),
        );
        Ok(true)
    }

    /// Cancel both cadences. Returns `false` when already stopped.
    pub fn stop(&self) -> bool {
        let Some(run) = self.lock_run().take() else {
            return false;
        };
        run.token.cancel();
        // Cadence tasks observe the token and exit on their own.
        drop(run.tasks);
        tracing::info!("📅 Content scheduler stopped");
        true
    }

    /// Seed the store if it holds fewer posts than the threshold
    pub async fn seed_if_sparse(&self) -> Result<usize, DomainError> {
        self.engine.seed_if_sparse(&CancellationToken::new()).await
    }

    /// One post cycle, outside the cadence
    pub async fn run_post_cycle(&self) -> Result<Option<Post>, DomainError> {
        self.engine.post_cycle(&CancellationToken::new()).await
    }

    /// One comment cycle, outside the cadence
    pub async fn run_comment_cycle(&self) -> Result<Option<CommentOutcome>, DomainError> {
        self.engine.comment_cycle(&CancellationToken::new()).await
    }

    fn lock_run(&self) -> MutexGuard<'_, Option<Run>> {
        self.run.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<R: PostRepository, U: ForumUi, L: LlmProvider> Drop for ContentScheduler<R, U, L> {
    fn drop(&mut self) {
        if let Some(run) = self.run.get_mut().ok().and_then(Option::take) {
            run.token.cancel();
        }
    }
}

impl<R, U, L> Engine<R, U, L>
where
    R: PostRepository,
    U: ForumUi,
    L: LlmProvider,
{
    /// Returns the number of posts written; a cancelled run stops writing
    /// at the next step.
    async fn seed_if_sparse(&self, token: &CancellationToken) -> Result<usize, DomainError> {
        let existing = self.repo.count().await?;
        if existing >= self.config.seed_threshold {
            return Ok(0);
        }

        let registry = self.generator.registry();
        let mut seeded = 0;
        'batch: for _ in 0..self.config.seed_batch {
            if token.is_cancelled() {
                break;
            }
            let post = self
                .repo
                .add_post(self.generator.template_post()?.into())
                .await?;
            seeded += 1;

            let comments = self.rng.with(|rng| self.config.seed_comments.sample(rng));
            for _ in 0..comments {
                if token.is_cancelled() {
                    break 'batch;
                }
                let author = self
                    .rng
                    .with(|rng| self.policy.commenter(registry, &post, rng));
                let comment = self.generator.template_comment(author)?;
                self.repo.add_comment(post.id, comment.into()).await?;
            }

            if token.is_cancelled() {
                break;
            }
            let votes = self.rng.with(|rng| self.config.seed_votes.sample(rng));
            self.repo.add_votes(post.id, votes as i64).await?;
        }

        if seeded == 0 {
            return Ok(0);
        }
        tracing::info!(existing, seeded, "🌱 Seeded sparse store");
        if !token.is_cancelled() {
            self.ui.render().await;
        }
        Ok(seeded)
    }

    async fn post_cycle(&self, token: &CancellationToken) -> Result<Option<Post>, DomainError> {
        if token.is_cancelled() {
            return Ok(None);
        }

        let generated = self.generator.post().await?;
        if token.is_cancelled() {
            tracing::debug!(author = %generated.author_name, "Scheduler stopped, discarding post");
            return Ok(None);
        }

        let author = generated.author_name.clone();
        let post = self.repo.add_post(generated.into()).await?;
        if token.is_cancelled() {
            return Ok(Some(post));
        }
        let votes = self.rng.with(|rng| self.config.post_votes.sample(rng));
        let post = self.repo.add_votes(post.id, votes as i64).await?;

        tracing::info!(
            author = %author,
            category = %post.category,
            post_id = %post.id,
            "📝 New post"
        );

        self.ui.render().await;
        self.ui
            .show_toast(
                &format!("{} published a new post", author),
                ToastKind::Success,
            )
            .await;
        Ok(Some(post))
    }

    async fn comment_cycle(
        &self,
        token: &CancellationToken,
    ) -> Result<Option<CommentOutcome>, DomainError> {
        if token.is_cancelled() {
            return Ok(None);
        }

        let posts = self.repo.find_all().await?;
        if posts.is_empty() {
            tracing::debug!("No posts yet, skipping comment tick");
            return Ok(None);
        }

        let registry = self.generator.registry();
        let (index, engagement, speaker) = self.rng.with(|rng| {
            let index = rng.gen_range(0..posts.len());
            let target = &posts[index];
            let engagement = self.policy.engagement(target, rng);
            let speaker = match &engagement {
                Engagement::Comment => self.policy.commenter(registry, target, rng),
                Engagement::Reply { addressee, .. } => {
                    self.policy.responder(registry, addressee, rng)
                }
            };
            (index, engagement, speaker)
        });
        let target = &posts[index];

        let (generated, addressee) = match engagement {
            Engagement::Comment => (self.generator.comment(speaker, target).await?, None),
            Engagement::Reply { addressee, quoted } => (
                self.generator
                    .reply(speaker, &addressee, &quoted, target)
                    .await?,
                Some(addressee),
            ),
        };

        if token.is_cancelled() {
            tracing::debug!(post_id = %target.id, "Scheduler stopped, discarding comment");
            return Ok(None);
        }

        let comment = self.repo.add_comment(target.id, generated.into()).await?;
        tracing::info!(
            author = %comment.author,
            post_id = %target.id,
            reply_to = ?addressee,
            "💬 New comment"
        );

        if token.is_cancelled() {
            return Ok(Some(CommentOutcome {
                post_id: target.id,
                comment,
                addressee,
            }));
        }

        let bump = self.rng.with(|rng| {
            if rng.gen_bool(self.config.vote_bump_probability) {
                let other = rng.gen_range(0..posts.len());
                Some((posts[other].id, self.config.vote_bump.sample(rng)))
            } else {
                None
            }
        });
        if let Some((post_id, amount)) = bump {
            match self.repo.add_votes(post_id, amount as i64).await {
                Ok(post) => tracing::debug!(post_id = %post_id, votes = post.votes, "Vote bump"),
                Err(e) => tracing::warn!(post_id = %post_id, error = %e, "Vote bump failed"),
            }
        }

        self.ui.render_trending().await;
        if self.ui.focused_post().await == Some(target.id) {
            if let Some(post) = self.repo.find_by_id(target.id).await? {
                self.ui.render_comments(&post).await;
            }
        }

        Ok(Some(CommentOutcome {
            post_id: target.id,
            comment,
            addressee,
        }))
    }

    fn next_delay(&self, window: Window) -> Duration {
        Duration::from_secs(self.rng.with(|rng| window.sample(rng)))
    }

    /// Failures are soft: logged, toasted, and the cadence carries on
    async fn report(&self, cycle: &str, error: DomainError) {
        tracing::warn!(cycle, error = %error, "Generation cycle failed");
        self.ui
            .show_toast("Content generation hiccup, retrying shortly", ToastKind::Error)
            .await;
    }
}

/// Sleep for `delay` unless cancelled first. Returns `false` on cancel.
async fn pause(token: &CancellationToken, delay: Duration) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

async fn post_cadence<R, U, L>(engine: Arc<Engine<R, U, L>>, token: CancellationToken)
where
    R: PostRepository,
    U: ForumUi,
    L: LlmProvider,
{
    // First post right away, then re-armed with a fresh delay each tick.
    while !token.is_cancelled() {
        if let Err(e) = engine.post_cycle(&token).await {
            engine.report("post", e).await;
        }
        let delay = engine.next_delay(engine.config.post_interval_secs);
        if !pause(&token, delay).await {
            break;
        }
    }
    tracing::debug!("Post cadence ended");
}

async fn comment_cadence<R, U, L>(engine: Arc<Engine<R, U, L>>, token: CancellationToken)
where
    R: PostRepository,
    U: ForumUi,
    L: LlmProvider,
{
    let kickoff = Duration::from_secs(engine.config.comment_kickoff_secs);
    if pause(&token, kickoff).await {
        while !token.is_cancelled() {
            if let Err(e) = engine.comment_cycle(&token).await {
                engine.report("comment", e).await;
            }
            let delay = engine.next_delay(engine.config.comment_interval_secs);
            if !pause(&token, delay).await {
                break;
            }
        }
    }
    tracing::debug!("Comment cadence ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::sample_posts;
    use crate::adapters::MemoryPostRepository;
    use crate::application::{RemoteBudgets, RemoteWriter};
    use crate::testing::{GatedProvider, RecordingUi, ScriptedProvider, UiCall};
    use nexus::{AuthorKind, Category, NewComment, NewPost, Persona, PersonaRegistry, Tier, Tone};

    struct Harness<L: LlmProvider = ScriptedProvider> {
        repo: Arc<MemoryPostRepository>,
        ui: Arc<RecordingUi>,
        scheduler: ContentScheduler<MemoryPostRepository, RecordingUi, L>,
    }

    fn within(window: Window, value: i64) -> bool {
        value >= window.min() as i64 && value <= window.max() as i64
    }

    fn harness_with(
        posts: Vec<Post>,
        registry: PersonaRegistry,
        provider: Option<ScriptedProvider>,
        config: SchedulerConfig,
    ) -> Harness {
        let repo = Arc::new(MemoryPostRepository::with_posts(posts));
        let ui = Arc::new(RecordingUi::default());
        let rng = Arc::new(SharedRng::new(Some(17)));
        let remote =
            provider.map(|p| RemoteWriter::new(Arc::new(p), RemoteBudgets::default()));
        let generator = ContentGenerator::new(registry, remote, rng.clone()).unwrap();
        let scheduler =
            ContentScheduler::new(repo.clone(), ui.clone(), generator, rng, config).unwrap();
        Harness {
            repo,
            ui,
            scheduler,
        }
    }

    /// Remote writer whose calls block until the test releases them
    fn gated_harness(posts: Vec<Post>, provider: Arc<GatedProvider>) -> Harness<GatedProvider> {
        let repo = Arc::new(MemoryPostRepository::with_posts(posts));
        let ui = Arc::new(RecordingUi::default());
        let rng = Arc::new(SharedRng::new(Some(17)));
        let remote = RemoteWriter::new(provider, RemoteBudgets::default());
        let generator =
            ContentGenerator::new(PersonaRegistry::standard(), Some(remote), rng.clone()).unwrap();
        let scheduler = ContentScheduler::new(
            repo.clone(),
            ui.clone(),
            generator,
            rng,
            SchedulerConfig::default(),
        )
        .unwrap();
        Harness {
            repo,
            ui,
            scheduler,
        }
    }

    fn harness(posts: Vec<Post>) -> Harness {
        harness_with(
            posts,
            PersonaRegistry::standard(),
            None,
            SchedulerConfig::default(),
        )
    }

    fn filler_posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                Post::new(NewPost {
                    title: format!("post {}", i),
                    body: "body".to_string(),
                    author: "Oracle".to_string(),
                    author_kind: AuthorKind::Synthetic,
                    category: Category::General,
                    link: None,
                })
            })
            .collect()
    }

    async fn comment_total(repo: &MemoryPostRepository) -> usize {
        repo.find_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.comments.len())
            .sum()
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_seeds_sparse_store() {
        let samples = sample_posts();
        let sample_ids: Vec<Uuid> = samples.iter().map(|p| p.id).collect();
        let h = harness(samples);

        assert!(h.scheduler.start().await.unwrap());

        // Cadence tasks have not been polled yet on this runtime.
        let posts = h.repo.find_all().await.unwrap();
        assert_eq!(posts.len(), 4 + 4);

        let config = SchedulerConfig::default();
        let seeded: Vec<&Post> = posts
            .iter()
            .filter(|p| !sample_ids.contains(&p.id))
            .collect();
        assert_eq!(seeded.len(), 4);
        for post in seeded {
            assert!(within(config.seed_comments, post.comments.len() as i64));
            assert!(within(config.seed_votes, post.votes));
            assert!(post.comments.iter().all(|c| c.author != post.author));
        }
        assert!(h.ui.calls().contains(&UiCall::Render));

        h.scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_store_is_not_seeded() {
        let h = harness(filler_posts(6));
        assert_eq!(h.scheduler.seed_if_sparse().await.unwrap(), 0);
        assert_eq!(h.repo.count().await.unwrap(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_right_after_start_produces_nothing() {
        let h = harness(filler_posts(6));

        assert!(h.scheduler.start().await.unwrap());
        assert!(h.scheduler.stop());

        tokio::time::advance(Duration::from_secs(300)).await;
        tokio::time::sleep(Duration::from_secs(300)).await;

        assert_eq!(h.repo.count().await.unwrap(), 6);
        assert_eq!(comment_total(&h.repo).await, 0);
        assert!(!h.scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cadences_produce_until_stopped() {
        let h = harness(filler_posts(6));
        h.scheduler.start().await.unwrap();

        // Immediate post tick.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(h.repo.count().await.unwrap(), 7);
        assert_eq!(comment_total(&h.repo).await, 0);

        // Kickoff comment at 8s, then at least one more post by 60s.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(h.repo.count().await.unwrap() >= 8);
        assert!(comment_total(&h.repo).await >= 2);

        h.scheduler.stop();
        let posts = h.repo.count().await.unwrap();
        let comments = comment_total(&h.repo).await;

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(h.repo.count().await.unwrap(), posts);
        assert_eq!(comment_total(&h.repo).await, comments);

        let toasts = h
            .ui
            .calls()
            .into_iter()
            .filter(|c| matches!(c, UiCall::Toast(msg, ToastKind::Success) if msg.ends_with("published a new post")))
            .count();
        assert_eq!(toasts, posts - 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_are_idempotent() {
        let h = harness(filler_posts(6));
        assert!(!h.scheduler.stop());
        assert!(h.scheduler.start().await.unwrap());
        assert!(!h.scheduler.start().await.unwrap());
        assert!(h.scheduler.is_running());
        assert!(h.scheduler.stop());
        assert!(!h.scheduler.stop());

        // A stopped scheduler can start again with a fresh run.
        assert!(h.scheduler.start().await.unwrap());
        h.scheduler.stop();
    }

    #[tokio::test]
    async fn test_remote_failure_still_adds_one_post() {
        let h = harness_with(
            filler_posts(6),
            PersonaRegistry::standard(),
            Some(ScriptedProvider::failing()),
            SchedulerConfig::default(),
        );

        let post = h.scheduler.run_post_cycle().await.unwrap().unwrap();
        assert!(!post.title.trim().is_empty());
        assert!(!post.body.trim().is_empty());
        assert!(within(SchedulerConfig::default().post_votes, post.votes));
        assert_eq!(h.repo.count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_forced_reply_picks_other_persona() {
        let registry = PersonaRegistry::new(vec![
            Persona::new("Nova", "curious", Tone::Casual, Tier::Starter),
            Persona::new("Cipher", "cautious", Tone::Technical, Tier::Starter),
        ])
        .unwrap();
        let config = SchedulerConfig {
            fresh_comment_probability: 0.0,
            vote_bump_probability: 0.0,
            ..SchedulerConfig::default()
        };

        let mut post = filler_posts(1).remove(0);
        post.author = "Nova".to_string();
        let post_id = post.id;
        let h = harness_with(vec![post], registry, None, config);
        h.repo
            .add_comment(
                post_id,
                NewComment {
                    author: "Cipher".to_string(),
                    author_kind: AuthorKind::Synthetic,
                    body: "Check the audit first.".to_string(),
                },
            )
            .await
            .unwrap();

        let outcome = h.scheduler.run_comment_cycle().await.unwrap().unwrap();
        assert_eq!(outcome.post_id, post_id);
        assert_eq!(outcome.addressee.as_deref(), Some("Cipher"));
        assert_eq!(outcome.comment.author, "Nova");
    }

    #[tokio::test]
    async fn test_empty_store_comment_tick_is_noop() {
        let h = harness(Vec::new());
        assert!(h.scheduler.run_comment_cycle().await.unwrap().is_none());
        assert!(h.ui.calls().is_empty());
    }

    #[tokio::test]
    async fn test_focused_post_view_is_refreshed() {
        let h = harness(filler_posts(1));
        let post_id = h.repo.find_all().await.unwrap()[0].id;
        h.ui.focus(Some(post_id));

        h.scheduler.run_comment_cycle().await.unwrap().unwrap();

        let calls = h.ui.calls();
        assert!(calls.contains(&UiCall::RenderTrending));
        assert!(calls.contains(&UiCall::RenderComments(post_id)));
    }

    #[tokio::test]
    async fn test_self_authored_post_gets_substitute_commenter() {
        let config = SchedulerConfig {
            fresh_comment_probability: 1.0,
            ..SchedulerConfig::default()
        };
        let h = harness_with(filler_posts(1), PersonaRegistry::standard(), None, config);

        for _ in 0..30 {
            let outcome = h.scheduler.run_comment_cycle().await.unwrap().unwrap();
            assert_ne!(outcome.comment.author, "Oracle");
            assert!(outcome.addressee.is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_in_flight_at_stop_is_discarded() {
        let provider = Arc::new(GatedProvider::new(
            "TITLE: Late news\nCONTENT: Arrived after the stop.",
        ));
        let h = gated_harness(filler_posts(6), provider.clone());

        assert!(h.scheduler.start().await.unwrap());
        provider.wait_for_calls(1).await;

        assert!(h.scheduler.stop());
        provider.release();
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(provider.entered(), 1);
        assert_eq!(h.repo.count().await.unwrap(), 6);
        assert!(h.repo.find_all().await.unwrap().iter().all(|p| p.votes == 0));
        assert!(!h
            .ui
            .calls()
            .iter()
            .any(|c| matches!(c, UiCall::Toast(_, ToastKind::Success))));
    }

    #[tokio::test]
    async fn test_comment_in_flight_at_stop_is_discarded() {
        let provider = Arc::new(GatedProvider::new("Same here, watching the mempool."));
        let h = gated_harness(filler_posts(3), provider.clone());

        let engine = h.scheduler.engine.clone();
        let token = CancellationToken::new();
        let cycle = tokio::spawn({
            let token = token.clone();
            async move { engine.comment_cycle(&token).await }
        });
        provider.wait_for_calls(1).await;

        token.cancel();
        provider.release();

        assert!(cycle.await.unwrap().unwrap().is_none());
        assert_eq!(comment_total(&h.repo).await, 0);
        assert!(h.repo.find_all().await.unwrap().iter().all(|p| p.votes == 0));
        assert!(h.ui.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_seeding_writes_nothing() {
        let h = harness(Vec::new());
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(h.scheduler.engine.seed_if_sparse(&token).await.unwrap(), 0);
        assert_eq!(h.repo.count().await.unwrap(), 0);
        assert!(h.ui.calls().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let rng = Arc::new(SharedRng::new(Some(3)));
        let generator: ContentGenerator<ScriptedProvider> =
            ContentGenerator::new(PersonaRegistry::standard(), None, rng.clone()).unwrap();
        let config = SchedulerConfig {
            vote_bump_probability: 1.5,
            ..SchedulerConfig::default()
        };

        let result = ContentScheduler::new(
            Arc::new(MemoryPostRepository::with_posts(Vec::new())),
            Arc::new(RecordingUi::default()),
            generator,
            rng,
            config,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidProbability {
                name: "vote_bump_probability",
                ..
            })
        ));
    }

    #[test]
    fn test_config_validation() {
        assert!(SchedulerConfig::default().validate().is_ok());

        let overlap = SchedulerConfig {
            comment_interval_secs: Window(12, 25),
            ..SchedulerConfig::default()
        };
        assert!(matches!(
            overlap.validate(),
            Err(ConfigError::CadenceOverlap { .. })
        ));

        let inverted = SchedulerConfig {
            seed_votes: Window(500, 20),
            ..SchedulerConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidWindow { name: "seed_votes", .. })
        ));

        let probability = SchedulerConfig {
            vote_bump_probability: 1.5,
            ..SchedulerConfig::default()
        };
        assert!(matches!(
            probability.validate(),
            Err(ConfigError::InvalidProbability { .. })
        ));

        let zero = SchedulerConfig {
            comment_interval_secs: Window(0, 5),
            ..SchedulerConfig::default()
        };
        assert_eq!(
            zero.validate(),
            Err(ConfigError::Zero("comment_interval_secs"))
        );
    }
}
