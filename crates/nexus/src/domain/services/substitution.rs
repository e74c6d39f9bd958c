//! Substitution Engine - Fills `{placeholder}` tokens
//!
//! One `Substitution` covers one generation call. Identity tokens (author,
//! referenced personas, winner, addressee, thread topic) resolve once and stay
//! the same across every pattern filled through it, so a title and its body
//! agree on who is being compared. Categorical and numeric tokens are drawn
//! fresh on every occurrence.

use rand::Rng;

use super::registry::PersonaRegistry;
use super::vocabulary::{next_year, PeerSlot, TokenRule, Vocabulary};
use crate::domain::entities::{Pattern, Persona, Segment};
use crate::domain::errors::DomainError;

const DEFAULT_THREAD_TOPIC: &str = "signal";
const DEFAULT_ADDRESSEE: &str = "everyone";

/// Substitution context for a single generation call
pub struct Substitution<'a> {
    vocabulary: &'a Vocabulary,
    registry: &'a PersonaRegistry,
    author: &'a Persona,
    addressee: Option<&'a str>,
    thread_topic: Option<&'a str>,
    first_peer: Option<String>,
    second_peer: Option<String>,
    winner: Option<String>,
}

impl<'a> Substitution<'a> {
    pub fn new(
        vocabulary: &'a Vocabulary,
        registry: &'a PersonaRegistry,
        author: &'a Persona,
    ) -> Self {
        Self {
            vocabulary,
            registry,
            author,
            addressee: None,
            thread_topic: None,
            first_peer: None,
            second_peer: None,
            winner: None,
        }
    }

    /// Name the author being replied to (`{addressee}`)
    pub fn addressing(mut self, addressee: &'a str) -> Self {
        self.addressee = Some(addressee);
        self
    }

    /// Name the subject of the thread (`{thread_topic}`)
    pub fn on_topic(mut self, topic: &'a str) -> Self {
        self.thread_topic = Some(topic);
        self
    }

    pub fn author(&self) -> &'a Persona {
        self.author
    }

    /// Resolve every placeholder in `pattern`
    pub fn fill<R: Rng + ?Sized>(
        &mut self,
        pattern: &Pattern,
        rng: &mut R,
    ) -> Result<String, DomainError> {
        let mut out = String::with_capacity(pattern.source().len() + 32);

        for segment in pattern.segments() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Token(name) => {
                    let rule = self
                        .vocabulary
                        .rule(name)
                        .filter(TokenRule::is_resolvable)
                        .ok_or_else(|| DomainError::corpus_defect(pattern.source(), name))?;
                    out.push_str(&self.resolve(rule, rng));
                }
            }
        }

        Ok(out)
    }

    fn resolve<R: Rng + ?Sized>(&mut self, rule: TokenRule, rng: &mut R) -> String {
        match rule {
            TokenRule::Author => self.author.name.clone(),
            TokenRule::AuthorTier => self.author.tier.to_string(),
            TokenRule::Peer(slot) => self.peer(slot, rng),
            TokenRule::Winner => self.winner(rng),
            TokenRule::Addressee => self.addressee.unwrap_or(DEFAULT_ADDRESSEE).to_string(),
            TokenRule::ThreadTopic => self
                .thread_topic
                .unwrap_or(DEFAULT_THREAD_TOPIC)
                .to_string(),
            TokenRule::NextYear => next_year().to_string(),
            TokenRule::Choice(options) => options[rng.gen_range(0..options.len())].to_string(),
            TokenRule::Range(range) => range.format(range.sample(rng)),
        }
    }

    /// Peers avoid the author, and the second avoids the first, whenever the
    /// registry is large enough.
    fn peer<R: Rng + ?Sized>(&mut self, slot: PeerSlot, rng: &mut R) -> String {
        if let Some(name) = self.cached_peer(slot) {
            return name.to_string();
        }

        let author: &'a Persona = self.author;
        let mut excluded = vec![author.name.as_str()];
        let other = match slot {
            PeerSlot::First => self.second_peer.as_deref(),
            PeerSlot::Second => self.first_peer.as_deref(),
        };
        excluded.extend(other);

        let name = self.registry.pick_excluding(&excluded, rng).name.clone();
        match slot {
            PeerSlot::First => self.first_peer = Some(name.clone()),
            PeerSlot::Second => self.second_peer = Some(name.clone()),
        }
        name
    }

    fn cached_peer(&self, slot: PeerSlot) -> Option<&str> {
        match slot {
            PeerSlot::First => self.first_peer.as_deref(),
            PeerSlot::Second => self.second_peer.as_deref(),
        }
    }

    fn winner<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        if let Some(winner) = &self.winner {
            return winner.clone();
        }
        let first = self.peer(PeerSlot::First, rng);
        let second = self.peer(PeerSlot::Second, rng);
        let winner = if rng.gen_bool(0.5) { first } else { second };
        self.winner = Some(winner.clone());
        winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::has_placeholder;
    use crate::domain::value_objects::{Tier, Tone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fill_once(source: &str, seed: u64) -> String {
        let vocabulary = Vocabulary::standard();
        let registry = PersonaRegistry::standard();
        let author = registry.get("Nova").unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        Substitution::new(&vocabulary, &registry, author)
            .fill(&Pattern::parse(source), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_author_tokens_use_current_persona() {
        let text = fill_once("{agent} here, aka {agent_name}, tier {own_tier}", 1);
        assert_eq!(text, "Nova here, aka Nova, tier starter");
    }

    #[test]
    fn test_peers_are_consistent_across_patterns() {
        let vocabulary = Vocabulary::standard();
        let registry = PersonaRegistry::standard();
        let author = registry.get("Cipher").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut sub = Substitution::new(&vocabulary, &registry, author);

        let title = sub
            .fill(&Pattern::parse("{agent1}|{agent2}"), &mut rng)
            .unwrap();
        let body = sub
            .fill(&Pattern::parse("{agent1}|{agent2}|{winner}|{winner}"), &mut rng)
            .unwrap();

        let title_parts: Vec<&str> = title.split('|').collect();
        let body_parts: Vec<&str> = body.split('|').collect();
        assert_eq!(title_parts[..], body_parts[..2]);
        assert_ne!(title_parts[0], title_parts[1]);
        assert_ne!(title_parts[0], "Cipher");
        assert_ne!(title_parts[1], "Cipher");
        assert_eq!(body_parts[2], body_parts[3]);
        assert!(body_parts[2] == title_parts[0] || body_parts[2] == title_parts[1]);
    }

    #[test]
    fn test_categorical_tokens_resolve_independently() {
        // Ten coins, twenty occurrences: identical draws every time would mean caching.
        let source = "{coin} ".repeat(20);
        let distinct: std::collections::HashSet<String> = (0..5)
            .flat_map(|seed| {
                fill_once(&source, seed)
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        assert!(distinct.len() > 1);
    }

    #[test]
    fn test_reply_context_tokens() {
        let vocabulary = Vocabulary::standard();
        let registry = PersonaRegistry::standard();
        let author = registry.get("Oracle").unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let text = Substitution::new(&vocabulary, &registry, author)
            .addressing("Sentinel")
            .on_topic("defi")
            .fill(&Pattern::parse("{addressee} on {thread_topic}"), &mut rng)
            .unwrap();
        assert_eq!(text, "Sentinel on defi");

        let fallback = Substitution::new(&vocabulary, &registry, author)
            .fill(&Pattern::parse("{addressee} on {thread_topic}"), &mut rng)
            .unwrap();
        assert_eq!(fallback, "everyone on signal");
    }

    #[test]
    fn test_numeric_tokens_stay_in_bounds() {
        let vocabulary = Vocabulary::standard();
        let registry = PersonaRegistry::standard();
        let author = registry.get("Quantum").unwrap();
        let mut rng = StdRng::seed_from_u64(1234);

        for (name, range) in vocabulary.ranges() {
            let pattern = Pattern::parse(&format!("{{{}}}", name));
            for _ in 0..200 {
                let text = Substitution::new(&vocabulary, &registry, author)
                    .fill(&pattern, &mut rng)
                    .unwrap();
                let value: i64 = text.replace(',', "").parse().unwrap();
                assert!(range.contains(value), "{} = {} out of range", name, value);
            }
        }
    }

    #[test]
    fn test_unknown_token_fails_loudly() {
        let vocabulary = Vocabulary::standard();
        let registry = PersonaRegistry::standard();
        let author = registry.get("Nova").unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let result = Substitution::new(&vocabulary, &registry, author)
            .fill(&Pattern::parse("hello {nobody_declared_this}"), &mut rng);
        assert!(matches!(result, Err(DomainError::CorpusDefect { .. })));
    }

    #[test]
    fn test_unchecked_empty_choice_is_defect_not_panic() {
        let vocabulary = Vocabulary::standard().with_rule("rarity", TokenRule::Choice(&[]));
        let registry = PersonaRegistry::standard();
        let author = registry.get("Nova").unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let result = Substitution::new(&vocabulary, &registry, author)
            .fill(&Pattern::parse("{rarity} floor"), &mut rng);
        assert!(matches!(result, Err(DomainError::CorpusDefect { .. })));
    }

    #[test]
    fn test_single_persona_registry_still_resolves_peers() {
        let vocabulary = Vocabulary::standard();
        let solo = Persona::new("Solo", "alone", Tone::Bold, Tier::Elite);
        let registry = PersonaRegistry::new(vec![solo.clone()]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let text = Substitution::new(&vocabulary, &registry, &solo)
            .fill(&Pattern::parse("{agent1} vs {agent2}: {winner}"), &mut rng)
            .unwrap();
        assert_eq!(text, "Solo vs Solo: Solo");
        assert!(!has_placeholder(&text));
    }
}
