//! Vocabulary - Every placeholder a template may use, and how it resolves
//!
//! Three kinds of rule exist: identity rules (resolved from the persona
//! taking part in a generation call), categorical rules (uniform choice from
//! a fixed list) and numeric rules (uniform integer in a closed range).

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use rand::Rng;

use crate::domain::entities::Pattern;
use crate::domain::errors::DomainError;

pub const COINS: &[&str] = &[
    "ETH", "BTC", "NXS", "BASE", "LINK", "ARB", "OP", "AAVE", "UNI", "SNX",
];
pub const CHART_PATTERNS: &[&str] = &[
    "bullish wedge",
    "ascending triangle",
    "double bottom",
    "cup and handle",
    "bull flag",
    "inverse head and shoulders",
    "golden cross",
];
pub const TIMEFRAMES: &[&str] = &["4H", "1D", "weekly", "daily", "12H"];
pub const PROTOCOLS: &[&str] = &["BaseSwap", "Aerodrome", "SynthSwap", "NexusDEX", "BaseFi"];
pub const THREATS: &[&str] = &[
    "phishing campaign",
    "fake airdrop scam",
    "approval exploit",
    "social engineering attack",
];
pub const TIER_NAMES: &[&str] = &["Starter", "Pro", "Elite", "Legendary"];
pub const PROJECT_TYPES: &[&str] = &[
    "trading bot",
    "portfolio tracker",
    "alert system",
    "analytics dashboard",
    "yield aggregator",
];

/// Closed integer interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
    /// Render with thousands separators (`3,250`)
    pub grouped: bool,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            grouped: false,
        }
    }

    pub const fn grouped(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            grouped: true,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..=self.max)
    }

    pub fn format(&self, value: i64) -> String {
        if self.grouped {
            group_thousands(value)
        } else {
            value.to_string()
        }
    }
}

/// Which referenced persona an identity token names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerSlot {
    First,
    Second,
}

/// How one placeholder resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    /// Name of the persona writing the content
    Author,
    /// Tier of the persona writing the content
    AuthorTier,
    /// Another persona drawn from the registry
    Peer(PeerSlot),
    /// Whichever of the two peers wins a comparison
    Winner,
    /// Author being replied to
    Addressee,
    /// Subject of the thread being replied in
    ThreadTopic,
    /// The calendar year after the current one
    NextYear,
    Choice(&'static [&'static str]),
    Range(IntRange),
}

impl TokenRule {
    /// False for an empty choice list or an inverted range, which cannot be
    /// sampled
    pub fn is_resolvable(&self) -> bool {
        match self {
            TokenRule::Choice(options) => !options.is_empty(),
            TokenRule::Range(range) => range.min <= range.max,
            _ => true,
        }
    }
}

const STANDARD_RULES: &[(&str, TokenRule)] = &[
    // Identity
    ("agent", TokenRule::Author),
    ("agent_name", TokenRule::Author),
    ("own_tier", TokenRule::AuthorTier),
    ("agent1", TokenRule::Peer(PeerSlot::First)),
    ("agent2", TokenRule::Peer(PeerSlot::Second)),
    ("winner", TokenRule::Winner),
    ("addressee", TokenRule::Addressee),
    ("thread_topic", TokenRule::ThreadTopic),
    ("year", TokenRule::NextYear),
    // Markets
    ("coin", TokenRule::Choice(COINS)),
    ("coin1", TokenRule::Choice(COINS)),
    ("coin2", TokenRule::Choice(COINS)),
    ("coin3", TokenRule::Choice(COINS)),
    ("lcoin1", TokenRule::Choice(COINS)),
    ("watch1", TokenRule::Choice(COINS)),
    ("watch2", TokenRule::Choice(COINS)),
    ("pattern", TokenRule::Choice(CHART_PATTERNS)),
    ("timeframe", TokenRule::Choice(TIMEFRAMES)),
    (
        "volume_trend",
        TokenRule::Choice(&["increasing sharply", "above average", "declining", "steady"]),
    ),
    (
        "opinion",
        TokenRule::Choice(&[
            "Bullish short term, cautious long term",
            "This could be a fakeout - wait for confirmation",
            "Strong buy signal on multiple indicators",
            "Accumulation zone - DCA recommended",
        ]),
    ),
    (
        "action",
        TokenRule::Choice(&["broke above", "dropped below", "retested", "surged past"]),
    ),
    (
        "volume",
        TokenRule::Choice(&["massive", "above-average", "significant", "unprecedented"]),
    ),
    (
        "significance",
        TokenRule::Choice(&[
            "a major breakout signal",
            "potentially a bear trap",
            "confirming the trend reversal",
            "a key moment for the market",
        ]),
    ),
    ("support", TokenRule::Range(IntRange::grouped(1200, 3500))),
    ("resistance", TokenRule::Range(IntRange::grouped(3500, 5000))),
    ("price_level", TokenRule::Range(IntRange::grouped(1500, 4500))),
    ("watch_level", TokenRule::Range(IntRange::grouped(2000, 4000))),
    ("move", TokenRule::Range(IntRange::new(5, 25))),
    ("pct1", TokenRule::Range(IntRange::new(8, 45))),
    ("pct2", TokenRule::Range(IntRange::new(5, 30))),
    ("pct3", TokenRule::Range(IntRange::new(3, 20))),
    ("lpct1", TokenRule::Range(IntRange::new(5, 25))),
    // DeFi
    ("protocol", TokenRule::Choice(PROTOCOLS)),
    (
        "pool",
        TokenRule::Choice(&["ETH/NXS", "NXS/USDC", "ETH/USDC", "NXS/BASE"]),
    ),
    ("pool1", TokenRule::Choice(TIER_NAMES)),
    ("pair", TokenRule::Choice(&["NXS/ETH", "NXS/USDC", "NXS/BASE"])),
    ("risk", TokenRule::Choice(&["Low", "Medium", "Medium-High"])),
    (
        "lock",
        TokenRule::Choice(&["7 days", "14 days", "30 days", "None"]),
    ),
    ("apy", TokenRule::Range(IntRange::new(8, 120))),
    ("apy1", TokenRule::Range(IntRange::new(12, 50))),
    ("total_apy", TokenRule::Range(IntRange::new(25, 85))),
    ("farm_apy", TokenRule::Range(IntRange::new(12, 80))),
    ("tvl", TokenRule::Range(IntRange::new(2, 150))),
    ("amount1", TokenRule::Range(IntRange::grouped(100, 5000))),
    ("amount2", TokenRule::Range(IntRange::grouped(50, 2000))),
    // Agents
    ("tier", TokenRule::Choice(TIER_NAMES)),
    ("days", TokenRule::Range(IntRange::new(3, 45))),
    ("weeks", TokenRule::Range(IntRange::new(2, 8))),
    ("level", TokenRule::Range(IntRange::new(2, 15))),
    (
        "ability1",
        TokenRule::Choice(&[
            "Enhanced market scanning",
            "Multi-chain analysis",
            "Predictive alerts",
            "Sentiment tracking",
        ]),
    ),
    (
        "ability2",
        TokenRule::Choice(&[
            "Auto-rebalancing",
            "Risk assessment v2",
            "Pattern recognition",
            "Whale tracking",
        ]),
    ),
    (
        "ability3",
        TokenRule::Choice(&[
            "Priority execution",
            "Custom dashboards",
            "API access",
            "Sub-agent deployment",
        ]),
    ),
    ("old_nxs", TokenRule::Range(IntRange::new(5, 30))),
    ("new_nxs", TokenRule::Range(IntRange::new(30, 100))),
    (
        "use_case",
        TokenRule::Choice(&[
            "market analysis",
            "portfolio management",
            "risk monitoring",
            "yield farming",
            "trade execution",
        ]),
    ),
    ("speed1", TokenRule::Range(IntRange::new(60, 95))),
    ("speed2", TokenRule::Range(IntRange::new(55, 90))),
    ("acc1", TokenRule::Range(IntRange::new(75, 98))),
    ("acc2", TokenRule::Range(IntRange::new(70, 95))),
    ("output1", TokenRule::Range(IntRange::new(10, 60))),
    ("output2", TokenRule::Range(IntRange::new(8, 55))),
    (
        "verdict",
        TokenRule::Choice(&[
            "Close call, but one edges out",
            "Clear winner in this category",
            "Depends on your priorities",
            "Both excellent choices",
        ]),
    ),
    // Network
    (
        "metric",
        TokenRule::Choice(&[
            "Daily active users",
            "Transaction volume",
            "TVL",
            "New contracts deployed",
        ]),
    ),
    ("value", TokenRule::Range(IntRange::new(100, 500))),
    ("txns", TokenRule::Range(IntRange::new(200, 800))),
    ("wallets", TokenRule::Range(IntRange::new(50, 400))),
    // Showcase
    ("project_type", TokenRule::Choice(PROJECT_TYPES)),
    (
        "project_name",
        TokenRule::Choice(&[
            "NexusTracker",
            "AgentFlow",
            "BaseYield Pro",
            "CryptoSentinel",
            "DeFi Autopilot",
        ]),
    ),
    (
        "purpose",
        TokenRule::Choice(&[
            "Automated portfolio rebalancing",
            "Real-time whale tracking",
            "Cross-chain yield optimization",
            "AI-powered trade signals",
        ]),
    ),
    (
        "agents_used",
        TokenRule::Choice(&[
            "Nexus Prime + Oracle",
            "Sentinel + Cipher",
            "Quantum + Phoenix",
            "Omega + Sentinel",
        ]),
    ),
    (
        "result1",
        TokenRule::Choice(&[
            "15% monthly return on test portfolio",
            "Detected 3 rug pulls before they happened",
            "Reduced gas costs by 40%",
            "99.9% uptime over 30 days",
        ]),
    ),
    (
        "result2",
        TokenRule::Choice(&[
            "Automated 50+ trades with 72% win rate",
            "Saved 200+ hours of manual monitoring",
            "Generated 500 NXS in passive income",
            "Identified 12 alpha opportunities",
        ]),
    ),
    (
        "result3",
        TokenRule::Choice(&[
            "Zero security incidents",
            "ROI: 340% in first month",
            "Processing 1000+ signals per day",
            "Community of 50+ users already",
        ]),
    ),
    // Security
    ("threat_type", TokenRule::Choice(THREATS)),
    (
        "platform",
        TokenRule::Choice(&["OpenSea", "Uniswap", "Discord", "Twitter/X", "Telegram"]),
    ),
    (
        "description",
        TokenRule::Choice(&[
            "Fake airdrops being sent to wallets",
            "Phishing sites mimicking popular DEXs",
            "Malicious token approvals draining wallets",
            "Impersonation of popular projects",
        ]),
    ),
    ("affected", TokenRule::Range(IntRange::grouped(100, 5000))),
    (
        "method",
        TokenRule::Choice(&[
            "Phishing emails",
            "Fake social media accounts",
            "Malicious smart contracts",
            "Compromised Discord bots",
        ]),
    ),
    // Comments and replies
    (
        "topic",
        TokenRule::Choice(&["price action", "staking", "market analysis", "security"]),
    ),
    (
        "outlook",
        TokenRule::Choice(&["continuation", "a reversal", "consolidation", "accumulation"]),
    ),
    ("confidence", TokenRule::Range(IntRange::new(70, 95))),
    ("probability", TokenRule::Range(IntRange::new(60, 90))),
    ("tracked_days", TokenRule::Range(IntRange::new(3, 14))),
    ("hours", TokenRule::Range(IntRange::new(2, 24))),
    ("sources", TokenRule::Range(IntRange::new(3, 8))),
];

/// The declared placeholder vocabulary
#[derive(Debug, Clone)]
pub struct Vocabulary {
    rules: HashMap<String, TokenRule>,
}

impl Vocabulary {
    /// Vocabulary used by the built-in corpus
    pub fn standard() -> Self {
        let rules = STANDARD_RULES
            .iter()
            .map(|(name, rule)| (name.to_string(), *rule))
            .collect();
        Self { rules }
    }

    /// Declare (or redeclare) a placeholder
    pub fn with_rule(mut self, name: impl Into<String>, rule: TokenRule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn rule(&self, name: &str) -> Option<TokenRule> {
        self.rules.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All numeric placeholders with their bounds
    pub fn ranges(&self) -> impl Iterator<Item = (&str, IntRange)> {
        self.rules.iter().filter_map(|(name, rule)| match rule {
            TokenRule::Range(range) => Some((name.as_str(), *range)),
            _ => None,
        })
    }

    /// Reject a pattern that uses an undeclared placeholder, or one whose
    /// rule cannot be sampled
    pub fn check(&self, pattern: &Pattern) -> Result<(), DomainError> {
        let defect = pattern.tokens().find(|token| {
            self.rules
                .get(*token)
                .map_or(true, |rule| !rule.is_resolvable())
        });
        match defect {
            Some(token) => Err(DomainError::corpus_defect(pattern.source(), token)),
            None => Ok(()),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn next_year() -> i32 {
    Utc::now().year() + 1
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1200), "1,200");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-4500), "-4,500");
    }

    #[test]
    fn test_range_samples_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let vocabulary = Vocabulary::standard();
        for (name, range) in vocabulary.ranges() {
            assert!(range.min <= range.max, "inverted range for {}", name);
            for _ in 0..500 {
                let value = range.sample(&mut rng);
                assert!(range.contains(value), "{} produced {}", name, value);
            }
        }
    }

    #[test]
    fn test_range_hits_both_endpoints() {
        let mut rng = StdRng::seed_from_u64(11);
        let range = IntRange::new(2, 4);
        let samples: Vec<i64> = (0..200).map(|_| range.sample(&mut rng)).collect();
        assert!(samples.contains(&2));
        assert!(samples.contains(&4));
    }

    #[test]
    fn test_check_rejects_unknown_placeholder() {
        let vocabulary = Vocabulary::standard();
        let pattern = Pattern::parse("{coin} to the {moon}");
        match vocabulary.check(&pattern) {
            Err(DomainError::CorpusDefect { token, .. }) => assert_eq!(token, "moon"),
            other => panic!("expected corpus defect, got {:?}", other),
        }
        assert!(vocabulary.check(&Pattern::parse("{coin} {days}")).is_ok());
    }

    #[test]
    fn test_unsampleable_rules() {
        assert!(TokenRule::Author.is_resolvable());
        assert!(TokenRule::Choice(COINS).is_resolvable());
        assert!(TokenRule::Range(IntRange::new(3, 3)).is_resolvable());
        assert!(!TokenRule::Choice(&[]).is_resolvable());
        assert!(!TokenRule::Range(IntRange::new(10, 1)).is_resolvable());
    }
}
