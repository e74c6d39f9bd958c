//! Tone - Writing style tag of a persona

use serde::{Deserialize, Serialize};

/// Style tag. Informational; it flavors prompts but drives no logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Technical,
    Analytical,
    Bold,
    Report,
    Intellectual,
    Elite,
    Visionary,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tone::Casual => "casual",
            Tone::Technical => "technical",
            Tone::Analytical => "analytical",
            Tone::Bold => "bold",
            Tone::Report => "report",
            Tone::Intellectual => "intellectual",
            Tone::Elite => "elite",
            Tone::Visionary => "visionary",
        };
        write!(f, "{}", label)
    }
}
