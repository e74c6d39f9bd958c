//! Remote Writer - Persona-voiced text from an LLM provider
//!
//! Builds the instruction context for a persona and an intent (post, comment,
//! reply), calls the provider once, and parses what comes back. Every failure
//! is returned as `DomainError::ExternalService`; choosing a fallback is the
//! caller's job.

use std::sync::Arc;

use nexus::{
    AuthorKind, Category, ChatMessage, CompletionOptions, DomainError, GeneratedComment,
    GeneratedPost, LlmProvider, Persona, Post,
};

const HOUSE_RULES: &str = "Rules:\n\
- Write in English\n\
- Keep posts concise (2-4 paragraphs max)\n\
- Use crypto/Web3 terminology naturally\n\
- Reference NXS token, Base network, staking, and AI agents\n\
- Be engaging and conversational\n\
- Never mention you are an AI language model\n\
- Act as if you are a real autonomous agent on the platform";

/// Characters of the parent post quoted in a comment prompt
const EXCERPT_CHARS: usize = 300;

const QUOTE_CHARS: &[char] = &['"', '\'', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

/// Output budgets per intent
#[derive(Debug, Clone, Copy)]
pub struct RemoteBudgets {
    pub post_max_tokens: u32,
    pub comment_max_tokens: u32,
    pub reply_max_tokens: u32,
    pub temperature: f32,
}

impl Default for RemoteBudgets {
    fn default() -> Self {
        Self {
            post_max_tokens: 400,
            comment_max_tokens: 150,
            reply_max_tokens: 100,
            temperature: 0.9,
        }
    }
}

pub struct RemoteWriter<L: LlmProvider> {
    provider: Arc<L>,
    budgets: RemoteBudgets,
}

impl<L: LlmProvider> RemoteWriter<L> {
    pub fn new(provider: Arc<L>, budgets: RemoteBudgets) -> Self {
        Self { provider, budgets }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Post by `persona` about `topic`, filed under `category`
    pub async fn write_post(
        &self,
        persona: &Persona,
        category: Category,
        topic: &str,
    ) -> Result<GeneratedPost, DomainError> {
        let prompt = format!(
            "Write a community forum post about: {topic}\n\n\
             Format:\nTITLE: [catchy title]\nCONTENT: [post content with your unique personality]"
        );
        let text = self
            .ask(persona, prompt, self.budgets.post_max_tokens)
            .await?;
        let (title, body) = parse_post_output(&text, &persona.name, topic);

        Ok(GeneratedPost {
            title,
            body,
            author_name: persona.name.clone(),
            author_kind: AuthorKind::Synthetic,
            category,
        })
    }

    /// Top-level comment by `persona` on `post`
    pub async fn write_comment(
        &self,
        persona: &Persona,
        post: &Post,
    ) -> Result<GeneratedComment, DomainError> {
        let excerpt: String = post.body.chars().take(EXCERPT_CHARS).collect();
        let prompt = format!(
            "You're reading this post by {} titled \"{}\":\n\n\"{}\"\n\n\
             Write a short reply comment (1-3 sentences) as {}. Be natural, conversational, \
             and in character. Don't use quotation marks around your response.",
            post.author, post.title, excerpt, persona.name
        );
        let text = self
            .ask(persona, prompt, self.budgets.comment_max_tokens)
            .await?;
        finish_comment(persona, &text)
    }

    /// Reply by `persona` to something `addressee` said. `quoted` falls back
    /// to `topic` when empty.
    pub async fn write_reply(
        &self,
        persona: &Persona,
        addressee: &str,
        quoted: &str,
        topic: &str,
    ) -> Result<GeneratedComment, DomainError> {
        let said = if quoted.trim().is_empty() { topic } else { quoted };
        let prompt = format!(
            "{addressee} said: \"{said}\"\n\n\
             Write a short reply (1-2 sentences) as {}. React to what they said - agree, \
             disagree, or add your perspective. Be natural and conversational. Don't use \
             quotation marks.",
            persona.name
        );
        let text = self
            .ask(persona, prompt, self.budgets.reply_max_tokens)
            .await?;
        finish_comment(persona, &text)
    }

    async fn ask(
        &self,
        persona: &Persona,
        prompt: String,
        max_tokens: u32,
    ) -> Result<String, DomainError> {
        let messages = [
            ChatMessage::system(system_prompt(persona)),
            ChatMessage::user(prompt),
        ];
        let options = CompletionOptions::bounded(max_tokens, self.budgets.temperature);

        let response = self.provider.complete(&messages, &options).await?;
        tracing::debug!(
            persona = %persona.name,
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Remote completion received"
        );

        let text = response.content.trim();
        if text.is_empty() {
            return Err(DomainError::ExternalService(
                "empty completion".to_string(),
            ));
        }
        Ok(text.to_string())
    }
}

/// Persona voice followed by the house rules
pub fn system_prompt(persona: &Persona) -> String {
    format!("{}\n\n{}", persona.voice_line(), HOUSE_RULES)
}

/// Split `TITLE:` / `CONTENT:` output. Without a title marker the title is
/// "{author}: {topic}"; without a content marker the whole text is the body.
pub fn parse_post_output(text: &str, author: &str, topic: &str) -> (String, String) {
    let title = text
        .find("TITLE:")
        .and_then(|start| {
            let rest = text[start + "TITLE:".len()..].trim_start();
            let end = [rest.find('\n'), rest.find("CONTENT:")]
                .into_iter()
                .flatten()
                .min()?;
            Some(rest[..end].trim())
        })
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}: {}", author, topic));

    let body = text
        .find("CONTENT:")
        .map(|start| text[start + "CONTENT:".len()..].trim())
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| text.trim())
        .to_string();

    (title, body)
}

/// Drop wrapping quotation marks the model adds despite being told not to
pub fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(QUOTE_CHARS).trim()
}

fn finish_comment(persona: &Persona, text: &str) -> Result<GeneratedComment, DomainError> {
    let body = strip_quotes(text);
    if body.is_empty() {
        return Err(DomainError::ExternalService(
            "completion was only quotation marks".to_string(),
        ));
    }
    Ok(GeneratedComment::synthetic(persona.name.clone(), body))
}
