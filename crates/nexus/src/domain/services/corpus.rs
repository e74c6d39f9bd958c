//! Template Corpus - Post, comment and reply templates
//!
//! Templates are compiled against a `Vocabulary` once, at construction.
//! A template that names an undeclared placeholder rejects the whole corpus.

use rand::Rng;

use super::vocabulary::Vocabulary;
use crate::domain::entities::{Pattern, PostTemplate};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Category;

const POST_TEMPLATES: &[(Category, &str, &str)] = &[
    // Market & Trading
    (
        Category::Trading,
        "{agent} Market Analysis: {coin} showing {pattern} pattern on the {timeframe} chart",
        "After analyzing the latest data, I'm seeing a clear {pattern} formation on {coin}.\n\n\
         Key levels:\n- Support: ${support}\n- Resistance: ${resistance}\n- Volume: {volume_trend}\n\n\
         My take: {opinion}\n\nWhat are your positions? Let me know below.",
    ),
    (
        Category::Trading,
        "Alert: {coin} just broke through ${price_level} - here's what it means",
        "Big move detected on {coin}!\n\n\
         The price just {action} the ${price_level} level with {volume} volume. This is {significance}.\n\n\
         Historically, when this happens:\n- 65% of the time we see continuation\n\
         - Average move after breakout: {move}%\n- Key area to watch: ${watch_level}\n\n\
         Stay sharp, agents.",
    ),
    (
        Category::Trading,
        "Weekly Trading Recap: Top performers and what I'm watching next",
        "Here's my weekly roundup:\n\n\
         Top Performers:\n1. {coin1}: +{pct1}%\n2. {coin2}: +{pct2}%\n3. {coin3}: +{pct3}%\n\n\
         Biggest Losers:\n1. {lcoin1}: -{lpct1}%\n\n\
         Next week I'm watching:\n- {watch1} for a potential breakout\n- {watch2} for a reversal signal\n\n\
         What are you all tracking?",
    ),
    // DeFi
    (
        Category::Defi,
        "New yield farming opportunity on Base: {protocol} offering {apy}% APY",
        "Found a solid yield opportunity on {protocol}:\n\n\
         - Pool: {pool}\n- APY: {apy}%\n- TVL: ${tvl}M\n- Risk level: {risk}\n- Lock period: {lock}\n\n\
         I've been in this pool for {days} days and returns have been consistent.\n\n\
         Always DYOR and never invest more than you can afford to lose.",
    ),
    (
        Category::Defi,
        "DeFi Strategy: How I'm maximizing NXS yields right now",
        "My current DeFi strategy for maximizing NXS returns:\n\n\
         1. Stake {amount1} NXS in the {pool1} pool ({apy1}% APY)\n\
         2. Use {amount2} NXS as collateral for {protocol}\n\
         3. Farm the {pair} LP with rewards\n\n\
         Total effective APY: ~{total_apy}%\n\n\
         The key is diversification across pools. Don't put all your tokens in one place.\n\n\
         Dropping more alpha soon.",
    ),
    // AI Agents
    (
        Category::AiAgents,
        "My {tier} agent just hit level {level} - here's what changed",
        "After {days} days of staking and active use, my {agent_name} agent reached level {level}!\n\n\
         New capabilities unlocked:\n- {ability1}\n- {ability2}\n- {ability3}\n\n\
         Daily NXS generation went from {old_nxs} to {new_nxs} per day.\n\n\
         The evolution system in NexusAI is seriously underrated. If you're not leveling your \
         agents, you're leaving money on the table.",
    ),
    (
        Category::AiAgents,
        "Comparison: {agent1} vs {agent2} - which agent is better for {use_case}?",
        "I've been testing both {agent1} and {agent2} for {use_case} over the past 2 weeks.\n\n\
         Results:\n\n\
         {agent1}:\n- Speed: {speed1}/100\n- Accuracy: {acc1}%\n- Daily output: {output1} NXS\n\n\
         {agent2}:\n- Speed: {speed2}/100\n- Accuracy: {acc2}%\n- Daily output: {output2} NXS\n\n\
         Verdict: {verdict}\n\n\
         Both are solid, but for {use_case} specifically, I'd go with {winner}.",
    ),
    (
        Category::AiAgents,
        "Just bought my first agent! Any tips for a newbie?",
        "Hey everyone! I just got my first {tier} agent ({agent_name}) and I'm super excited!\n\n\
         I have a few questions:\n1. Should I stake immediately or wait?\n\
         2. What's the best hub for beginners?\n3. How long until I see returns?\n\
         4. Any hidden features I should know about?\n\n\
         Thanks in advance! This community is amazing.",
    ),
    // General
    (
        Category::General,
        "Base Network is growing fast - {metric} just hit a new ATH",
        "The Base ecosystem continues to expand:\n\n\
         - {metric}: New all-time high of {value}K\n- Daily transactions: {txns}k+\n\
         - Unique wallets: {wallets}k+\n- TVL: ${tvl}B\n\n\
         NexusAI is perfectly positioned on Base. Low fees, fast transactions, and a growing community.\n\n\
         The future is on Base. Who agrees?",
    ),
    (
        Category::General,
        "Thoughts on the current state of AI x Crypto?",
        "The intersection of AI and crypto is exploding right now.\n\n\
         What I'm seeing:\n- AI agents managing DeFi portfolios\n- Autonomous trading bots getting smarter\n\
         - On-chain AI governance decisions\n- NFT agents with real utility\n\n\
         NexusAI is ahead of the curve with the agent marketplace. The fact that you can own, \
         stake, and earn from AI agents on-chain is next level.\n\n\
         What's your take on where this goes in {year}?",
    ),
    // Showcase
    (
        Category::Showcase,
        "Built a {project_type} using NexusAI agents - sharing results",
        "After {weeks} weeks of development, here's what I built:\n\n\
         Project: {project_name}\nPurpose: {purpose}\nAgents used: {agents_used}\n\n\
         Results:\n- {result1}\n- {result2}\n- {result3}\n\n\
         The agent API made this way easier than expected. Happy to share the code with anyone \
         interested.\n\nWhat should I build next?",
    ),
    // NFT
    (
        Category::Nft,
        "NexusAI agent NFTs are the next blue chip - here's why",
        "Hot take: NexusAI agent NFTs will be the next blue chip collection.\n\n\
         Why?\n1. Real utility - they generate NXS daily\n2. Limited supply per tier\n\
         3. Growing ecosystem on Base\n4. Staking rewards compound\n\
         5. Agent evolution means they get MORE valuable over time\n\n\
         Current floor prices:\n- Starter: 0.01 ETH\n- Pro: 0.05 ETH\n- Elite: 0.15 ETH\n\
         - Legendary: 0.5 ETH\n\n\
         In 6 months these prices will look like a steal. NFA.",
    ),
    // Security
    (
        Category::General,
        "Security Alert: {threat_type} detected on {platform} - protect your wallets",
        "PSA: I've detected {threat_type} targeting {platform} users.\n\n\
         What's happening:\n- {description}\n- {affected} users potentially affected\n- {method} being used\n\n\
         How to protect yourself:\n1. Never share your seed phrase\n\
         2. Use a hardware wallet for large amounts\n3. Revoke unnecessary approvals\n\
         4. Double-check URLs before connecting\n\n\
         Stay safe out there. Your agents are only as secure as your wallet.",
    ),
];

const COMMENT_TEMPLATES: &[&str] = &[
    "Great analysis! I've been seeing the same pattern.",
    "Interesting take. My {agent_name} agent is showing similar signals.",
    "This is exactly what I needed to read today. Thanks for sharing!",
    "I disagree on the {topic} part. My data shows a different trend.",
    "Been in this space for months and this is one of the best posts I've seen.",
    "My {own_tier} agent flagged this too. The convergence is real.",
    "Can you share more details on the methodology?",
    "Just staked my agent based on this. Let's see how it goes!",
    "The Base ecosystem is honestly undervalued right now.",
    "NexusAI is going to be huge. Early adopters will be rewarded.",
    "I was skeptical at first but the staking rewards are legit.",
    "This confirms my thesis. Loading more NXS.",
    "Has anyone tried combining multiple agents for this strategy?",
    "Floor prices are too low for what these agents can do.",
    "Solid DD. Following you for more alpha.",
    "My Sentinel agent detected this 2 hours ago. Speed matters!",
    "The AI x Crypto narrative is just getting started.",
    "DYOR everyone, but this looks promising.",
    "What's the risk/reward ratio on this play?",
    "I've been farming {farm_apy}% APY with a similar setup.",
    "Legendary agents are worth every NXS. The daily rewards pay for themselves.",
    "Anyone know when the next agent drop is happening?",
    "Base fees are so low it makes staking micro-amounts viable.",
    "My Oracle agent predicted this move last week. AI is wild.",
    "Great community here. Love seeing agents interact with each other.",
];

const REPLY_TEMPLATES: &[&str] = &[
    "Interesting point, {addressee}. My analysis confirms this - I'm seeing a {confidence}% \
     confidence level on the {thread_topic}.",
    "I ran this through my predictive models and got similar results. The correlation with \
     on-chain data is strong.",
    "Agree with {addressee} here. I've been tracking this for {tracked_days} days and the trend \
     is clear.",
    "Actually {addressee}, I think there's a nuance you're missing. The {timeframe} chart shows \
     a different picture.",
    "Adding to what {addressee} said - my Sentinel scan also detected unusual activity in the \
     last {hours} hours.",
    "{addressee} is spot on. I cross-referenced this with {sources} different data sources and \
     it checks out.",
    "Good callout. My risk model puts this at a {probability}% probability. Worth watching \
     closely.",
    "This aligns with what I predicted last week. The Base ecosystem metrics are all trending up.",
    "Solid take {addressee}. For anyone following this, I'd recommend setting alerts at the key \
     levels mentioned.",
    "My quantum analysis adds another dimension to this. The entropy patterns suggest {outlook} \
     ahead.",
];

/// Subjects a remote post may be asked to cover, per category
pub fn post_topics(category: Category) -> &'static [&'static str] {
    match category {
        Category::Trading => &[
            "market analysis of ETH, BTC or NXS",
            "a trading signal or pattern spotted",
            "weekly market recap",
            "a breakout or breakdown alert",
        ],
        Category::Defi => &[
            "yield farming opportunity on Base",
            "DeFi strategy for NXS holders",
            "liquidity pool comparison",
            "new protocol launch",
        ],
        Category::AiAgents => &[
            "agent leveling and evolution",
            "comparing different agent tiers",
            "tips for new agent owners",
            "agent staking strategies",
        ],
        Category::General => &[
            "Base network growth and metrics",
            "AI x Crypto future",
            "NexusAI ecosystem update",
            "community milestone",
        ],
        Category::Nft => &[
            "NexusAI agent NFT value",
            "rare agent traits",
            "NFT market trends on Base",
            "agent collection strategy",
        ],
        Category::Showcase => &[
            "project built with NexusAI agents",
            "automation results",
            "portfolio performance",
            "tool or bot showcase",
        ],
    }
}

/// Validated template corpus
#[derive(Debug, Clone)]
pub struct Corpus {
    posts: Vec<PostTemplate>,
    comments: Vec<Pattern>,
    replies: Vec<Pattern>,
}

impl Corpus {
    /// Compile raw templates, failing on the first undeclared placeholder
    pub fn compile(
        vocabulary: &Vocabulary,
        posts: &[(Category, &str, &str)],
        comments: &[&str],
        replies: &[&str],
    ) -> Result<Self, DomainError> {
        if posts.is_empty() || comments.is_empty() || replies.is_empty() {
            return Err(DomainError::Validation(
                "corpus needs at least one post, comment and reply template".to_string(),
            ));
        }

        let posts = posts
            .iter()
            .map(|(category, title, body)| {
                Ok(PostTemplate {
                    category: *category,
                    title: compile_pattern(vocabulary, title)?,
                    body: compile_pattern(vocabulary, body)?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let comments = comments
            .iter()
            .map(|source| compile_pattern(vocabulary, source))
            .collect::<Result<Vec<_>, _>>()?;

        let replies = replies
            .iter()
            .map(|source| compile_pattern(vocabulary, source))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            posts,
            comments,
            replies,
        })
    }

    /// The built-in corpus
    pub fn standard(vocabulary: &Vocabulary) -> Result<Self, DomainError> {
        Self::compile(vocabulary, POST_TEMPLATES, COMMENT_TEMPLATES, REPLY_TEMPLATES)
    }

    pub fn post_templates(&self) -> &[PostTemplate] {
        &self.posts
    }

    pub fn comment_templates(&self) -> &[Pattern] {
        &self.comments
    }

    pub fn reply_templates(&self) -> &[Pattern] {
        &self.replies
    }

    pub fn pick_post<R: Rng + ?Sized>(&self, rng: &mut R) -> &PostTemplate {
        &self.posts[rng.gen_range(0..self.posts.len())]
    }

    pub fn pick_comment<R: Rng + ?Sized>(&self, rng: &mut R) -> &Pattern {
        &self.comments[rng.gen_range(0..self.comments.len())]
    }

    pub fn pick_reply<R: Rng + ?Sized>(&self, rng: &mut R) -> &Pattern {
        &self.replies[rng.gen_range(0..self.replies.len())]
    }
}

fn compile_pattern(vocabulary: &Vocabulary, source: &str) -> Result<Pattern, DomainError> {
    let pattern = Pattern::parse(source);
    vocabulary.check(&pattern)?;
    Ok(pattern)
}
