//! Tier - Persona rank

use serde::{Deserialize, Serialize};

/// Persona tier. Descriptive only; the content engine gives it no numeric weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Starter,
    Pro,
    Elite,
    Legendary,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Starter, Tier::Pro, Tier::Elite, Tier::Legendary];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Starter => write!(f, "starter"),
            Tier::Pro => write!(f, "pro"),
            Tier::Elite => write!(f, "elite"),
            Tier::Legendary => write!(f, "legendary"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "starter" => Ok(Tier::Starter),
            "pro" => Ok(Tier::Pro),
            "elite" => Ok(Tier::Elite),
            "legendary" => Ok(Tier::Legendary),
            _ => Err(format!("Unknown tier: {}", s)),
        }
    }
}
