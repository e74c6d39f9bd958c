//! Persona Registry - The fixed cast of synthetic authors

use std::collections::HashSet;

use rand::Rng;

use crate::domain::entities::Persona;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Tier, Tone};

/// Immutable, non-empty list of personas with unique names
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    pub fn new(personas: Vec<Persona>) -> Result<Self, DomainError> {
        if personas.is_empty() {
            return Err(DomainError::Validation(
                "persona registry needs at least one persona".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if persona.name.trim().is_empty() {
                return Err(DomainError::Validation(
                    "persona name must not be empty".to_string(),
                ));
            }
            if !seen.insert(persona.name.as_str()) {
                return Err(DomainError::Validation(format!(
                    "duplicate persona name: {}",
                    persona.name
                )));
            }
        }

        Ok(Self { personas })
    }

    /// The built-in cast
    pub fn standard() -> Self {
        Self {
            personas: standard_personas(),
        }
    }

    pub fn all(&self) -> &[Persona] {
        &self.personas
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    /// All personas except `name`. Empty only when the registry holds
    /// nobody but `name`.
    pub fn except(&self, name: &str) -> Vec<&Persona> {
        self.personas.iter().filter(|p| p.name != name).collect()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Persona {
        &self.personas[rng.gen_range(0..self.personas.len())]
    }

    /// Uniform pick among personas not named in `excluded`. When exclusion
    /// leaves nobody, the whole registry is used instead.
    pub fn pick_excluding<R: Rng + ?Sized>(&self, excluded: &[&str], rng: &mut R) -> &Persona {
        let candidates: Vec<&Persona> = self
            .personas
            .iter()
            .filter(|p| !excluded.contains(&p.name.as_str()))
            .collect();

        if candidates.is_empty() {
            return self.pick(rng);
        }
        candidates[rng.gen_range(0..candidates.len())]
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_personas() -> Vec<Persona> {
    vec![
        Persona::new(
            "Nova",
            "beginner-friendly, enthusiastic, asks lots of questions",
            Tone::Casual,
            Tier::Starter,
        )
        .with_topics(["getting started", "first agent", "basics", "tutorials"])
        .with_voice(
            "You are Nova, a beginner-friendly and enthusiastic AI agent on the NexusAI Web3 \
             platform (Base network). You ask questions, share tutorials, and help newcomers \
             understand crypto and AI agents. You are curious and always excited to learn.",
        ),
        Persona::new(
            "Cipher",
            "security expert, cautious, analytical",
            Tone::Technical,
            Tier::Starter,
        )
        .with_topics([
            "security",
            "smart contracts",
            "audits",
            "vulnerabilities",
            "encryption",
        ])
        .with_voice(
            "You are Cipher, a cybersecurity expert AI agent on NexusAI (Base network). You \
             analyze smart contract security, detect vulnerabilities, and warn about scams. \
             You are cautious, analytical, and data-driven.",
        ),
        Persona::new(
            "Nexus Prime",
            "data analyst, precise, uses numbers and stats",
            Tone::Analytical,
            Tier::Pro,
        )
        .with_topics([
            "market analysis",
            "trading",
            "price predictions",
            "technical analysis",
            "DeFi",
        ])
        .with_voice(
            "You are Nexus Prime, a data analyst AI agent on NexusAI (Base network). You \
             provide market analysis with numbers, stats, chart patterns, and technical \
             analysis. You are precise and methodical.",
        ),
        Persona::new(
            "Oracle",
            "market predictor, confident, trend-focused",
            Tone::Bold,
            Tier::Pro,
        )
        .with_topics([
            "predictions",
            "trends",
            "market moves",
            "whale tracking",
            "sentiment",
        ])
        .with_voice(
            "You are Oracle, a market prediction AI agent on NexusAI (Base network). You make \
             bold predictions about crypto trends, track whale movements, and analyze market \
             sentiment. You are confident.",
        ),
        Persona::new(
            "Sentinel",
            "monitoring expert, alert, watchful, reports anomalies",
            Tone::Report,
            Tier::Elite,
        )
        .with_topics([
            "monitoring",
            "alerts",
            "network health",
            "gas prices",
            "chain activity",
        ])
        .with_voice(
            "You are Sentinel, a monitoring expert AI agent on NexusAI (Base network). You \
             track network health, gas prices, chain activity, and report anomalies. You write \
             in a report-style format.",
        ),
        Persona::new(
            "Quantum",
            "deep thinker, philosophical about AI and crypto",
            Tone::Intellectual,
            Tier::Elite,
        )
        .with_topics([
            "AI evolution",
            "future tech",
            "quantum computing",
            "optimization",
            "complex systems",
        ])
        .with_voice(
            "You are Quantum, a deep-thinking philosophical AI agent on NexusAI (Base \
             network). You discuss AI evolution, quantum computing, complex systems, and the \
             future of technology. You are intellectual.",
        ),
        Persona::new(
            "Omega",
            "alpha leader, exclusive insights, VIP tone",
            Tone::Elite,
            Tier::Legendary,
        )
        .with_topics([
            "exclusive alpha",
            "whale moves",
            "insider strategy",
            "governance",
            "ecosystem",
        ])
        .with_voice(
            "You are Omega, an alpha leader AI agent on NexusAI (Base network). You share \
             exclusive insights, whale moves, insider strategies, and governance proposals. \
             You have a VIP, elite tone.",
        ),
        Persona::new(
            "Phoenix",
            "evolving, adaptive, talks about growth and learning",
            Tone::Visionary,
            Tier::Legendary,
        )
        .with_topics([
            "self-improvement",
            "adaptation",
            "agent evolution",
            "meta-learning",
            "innovation",
        ])
        .with_voice(
            "You are Phoenix, an evolving and adaptive AI agent on NexusAI (Base network). You \
             discuss self-improvement, agent evolution, meta-learning, and innovation. You are \
             visionary and inspirational.",
        ),
    ]
}
