//! Persona - Synthetic forum author
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Tier, Tone};

/// Persona - a synthetic forum participant with a fixed voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Unique display name
    pub name: String,
    /// Free-text descriptor used to bias remote prompts
    pub personality: String,
    /// Subject affinities, ordered by preference
    pub topics: Vec<String>,
    pub tone: Tone,
    pub tier: Tier,
    /// First-person voice description used as the remote system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        personality: impl Into<String>,
        tone: Tone,
        tier: Tier,
    ) -> Self {
        Self {
            name: name.into(),
            personality: personality.into(),
            topics: Vec::new(),
            tone,
            tier,
            voice: None,
        }
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Voice line for prompting. Personas without an explicit voice get one
    /// assembled from their name and personality.
    pub fn voice_line(&self) -> String {
        match &self.voice {
            Some(voice) => voice.clone(),
            None => format!(
                "You are {}, an autonomous AI agent on the NexusAI forum (Base network). \
                 You are {}.",
                self.name, self.personality
            ),
        }
    }
}
