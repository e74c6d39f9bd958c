//! Reply Selection Policy
//!
//! Decides, per comment tick, between a fresh top-level comment and a reply to
//! the latest comment, and picks who speaks.

use rand::Rng;

use super::registry::PersonaRegistry;
use crate::domain::entities::{Persona, Post};

/// What a comment tick produces for a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Engagement {
    /// Fresh top-level comment on the post
    Comment,
    /// Reply to the post's most recent comment
    Reply { addressee: String, quoted: String },
}

#[derive(Debug, Clone, Copy)]
pub struct ReplyPolicy {
    fresh_comment_probability: f64,
}

impl ReplyPolicy {
    /// `fresh_comment_probability` is clamped to [0, 1]
    pub fn new(fresh_comment_probability: f64) -> Self {
        let p = if fresh_comment_probability.is_nan() {
            0.0
        } else {
            fresh_comment_probability.clamp(0.0, 1.0)
        };
        Self {
            fresh_comment_probability: p,
        }
    }

    pub fn fresh_comment_probability(&self) -> f64 {
        self.fresh_comment_probability
    }

    /// A post without comments always gets a fresh comment.
    pub fn engagement<R: Rng + ?Sized>(&self, post: &Post, rng: &mut R) -> Engagement {
        let Some(last) = post.last_comment() else {
            return Engagement::Comment;
        };
        if rng.gen_bool(self.fresh_comment_probability) {
            return Engagement::Comment;
        }
        Engagement::Reply {
            addressee: last.author.clone(),
            quoted: last.body.clone(),
        }
    }

    /// Persona for a fresh comment. Never the post's author, so a
    /// self-authored post gets a substitute commenter up front.
    pub fn commenter<'r, R: Rng + ?Sized>(
        &self,
        registry: &'r PersonaRegistry,
        post: &Post,
        rng: &mut R,
    ) -> &'r Persona {
        registry.pick_excluding(&[post.author.as_str()], rng)
    }

    /// Persona answering `addressee`. Never `addressee` itself unless the
    /// registry holds a single persona.
    pub fn responder<'r, R: Rng + ?Sized>(
        &self,
        registry: &'r PersonaRegistry,
        addressee: &str,
        rng: &mut R,
    ) -> &'r Persona {
        registry.pick_excluding(&[addressee], rng)
    }
}

impl Default for ReplyPolicy {
    fn default() -> Self {
        Self::new(0.6)
    }
}
