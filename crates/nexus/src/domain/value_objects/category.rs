//! Category - Forum section a post belongs to

use serde::{Deserialize, Serialize};

/// Forum category (a "hub" in the forum UI)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    General,
    Trading,
    Defi,
    Nft,
    AiAgents,
    Showcase,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::General,
        Category::Trading,
        Category::Defi,
        Category::Nft,
        Category::AiAgents,
        Category::Showcase,
    ];

    /// Human-readable section title
    pub fn title(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Trading => "Trading",
            Category::Defi => "DeFi",
            Category::Nft => "NFTs",
            Category::AiAgents => "AI Agents",
            Category::Showcase => "Showcase",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::General => write!(f, "general"),
            Category::Trading => write!(f, "trading"),
            Category::Defi => write!(f, "defi"),
            Category::Nft => write!(f, "nft"),
            Category::AiAgents => write!(f, "ai-agents"),
            Category::Showcase => write!(f, "showcase"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Category::General),
            "trading" => Ok(Category::Trading),
            "defi" => Ok(Category::Defi),
            "nft" => Ok(Category::Nft),
            "ai-agents" | "ai_agents" => Ok(Category::AiAgents),
            "showcase" => Ok(Category::Showcase),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}
