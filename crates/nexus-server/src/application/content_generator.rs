//! Content Generator (Use Case)
//!
//! Produces posts, comments and replies. The template path is synchronous and
//! always available; the remote path runs first when configured, and any
//! remote failure falls back to the template path within the same call.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use nexus::domain::post_topics;
use nexus::{
    AuthorKind, Category, Corpus, DomainError, GeneratedComment, GeneratedPost, LlmProvider,
    Persona, PersonaRegistry, Post, Substitution, Vocabulary,
};

use super::remote_writer::RemoteWriter;
use super::shared_rng::SharedRng;

pub struct ContentGenerator<L: LlmProvider> {
    vocabulary: Vocabulary,
    registry: PersonaRegistry,
    corpus: Corpus,
    remote: Option<RemoteWriter<L>>,
    rng: Arc<SharedRng>,
}

impl<L: LlmProvider> ContentGenerator<L> {
    /// Compiles the standard corpus; a corpus defect fails here, not mid-run
    pub fn new(
        registry: PersonaRegistry,
        remote: Option<RemoteWriter<L>>,
        rng: Arc<SharedRng>,
    ) -> Result<Self, DomainError> {
        let vocabulary = Vocabulary::standard();
        let corpus = Corpus::standard(&vocabulary)?;
        Ok(Self {
            vocabulary,
            registry,
            corpus,
            remote,
            rng,
        })
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub fn remote(&self) -> Option<&RemoteWriter<L>> {
        self.remote.as_ref()
    }

    /// Template post by a random persona
    pub fn template_post(&self) -> Result<GeneratedPost, DomainError> {
        let author = self.rng.with(|rng| self.registry.pick(rng));
        self.template_post_by(author)
    }

    pub fn template_post_by(&self, author: &Persona) -> Result<GeneratedPost, DomainError> {
        self.rng.with(|rng| {
            let template = self.corpus.pick_post(rng);
            let mut sub = Substitution::new(&self.vocabulary, &self.registry, author);
            let title = sub.fill(&template.title, rng)?;
            let body = sub.fill(&template.body, rng)?;

            Ok(GeneratedPost {
                title,
                body,
                author_name: author.name.clone(),
                author_kind: AuthorKind::Synthetic,
                category: template.category,
            })
        })
    }

    pub fn template_comment(&self, author: &Persona) -> Result<GeneratedComment, DomainError> {
        self.rng.with(|rng| {
            let pattern = self.corpus.pick_comment(rng);
            let body =
                Substitution::new(&self.vocabulary, &self.registry, author).fill(pattern, rng)?;
            Ok(GeneratedComment::synthetic(author.name.clone(), body))
        })
    }

    pub fn template_reply(
        &self,
        author: &Persona,
        addressee: &str,
        thread_topic: &str,
    ) -> Result<GeneratedComment, DomainError> {
        self.rng.with(|rng| {
            let pattern = self.corpus.pick_reply(rng);
            let body = Substitution::new(&self.vocabulary, &self.registry, author)
                .addressing(addressee)
                .on_topic(thread_topic)
                .fill(pattern, rng)?;
            Ok(GeneratedComment::synthetic(author.name.clone(), body))
        })
    }

    /// New post by a random persona. Remote posts pick a random category and
    /// one of its topics; template posts take the template's category.
    pub async fn post(&self) -> Result<GeneratedPost, DomainError> {
        let author = self.rng.with(|rng| self.registry.pick(rng));

        if let Some(remote) = &self.remote {
            let (category, topic) = self.rng.with(|rng| {
                let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
                let topic = post_topics(category)
                    .choose(rng)
                    .copied()
                    .unwrap_or("community milestone");
                (category, topic)
            });

            match remote.write_post(author, category, topic).await {
                Ok(post) => return Ok(post),
                Err(e) => tracing::warn!(
                    author = %author.name,
                    error = %e,
                    "Remote post failed, using template"
                ),
            }
        }

        self.template_post_by(author)
    }

    /// Fresh comment by `author` on `post`
    pub async fn comment(
        &self,
        author: &Persona,
        post: &Post,
    ) -> Result<GeneratedComment, DomainError> {
        if let Some(remote) = &self.remote {
            match remote.write_comment(author, post).await {
                Ok(comment) => return Ok(comment),
                Err(e) => tracing::warn!(
                    author = %author.name,
                    post_id = %post.id,
                    error = %e,
                    "Remote comment failed, using template"
                ),
            }
        }

        self.template_comment(author)
    }

    /// Reply by `author` to `addressee`, who said `quoted` on `post`
    pub async fn reply(
        &self,
        author: &Persona,
        addressee: &str,
        quoted: &str,
        post: &Post,
    ) -> Result<GeneratedComment, DomainError> {
        if let Some(remote) = &self.remote {
            match remote
                .write_reply(author, addressee, quoted, &post.title)
                .await
            {
                Ok(reply) => return Ok(reply),
                Err(e) => tracing::warn!(
                    author = %author.name,
                    addressee = %addressee,
                    error = %e,
                    "Remote reply failed, using template"
                ),
            }
        }

        self.template_reply(author, addressee, &post.category.to_string())
    }
}
