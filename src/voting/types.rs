use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Starting balance handed to an account on first reference.
pub const INITIAL_POINTS: f64 = 100.0;

/// Points debited from a voter for each cast vote.
pub const VOTE_COST: f64 = 10.0;

/// Direction of a cast vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteType::Up => write!(f, "up"),
            VoteType::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub up: u64,
    pub down: u64,
}

/// One cast vote in a subject's history. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub user_id: String,
    pub timestamp: u64,
    pub points_spent: f64,
    pub vote_type: VoteType,
    /// 1-based index among all of the subject's records at insertion time.
    pub position: usize,
}

/// A votable topic with its tally and append-only vote history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: u32,
    pub title: String,
    pub emoji: String,
    pub votes: VoteTally,
    pub voter_history: Vec<VoteRecord>,
    pub last_updated: u64,
}

impl Subject {
    pub fn new(id: u32, title: &str, emoji: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            emoji: emoji.to_string(),
            votes: VoteTally::default(),
            voter_history: Vec::new(),
            last_updated: now_millis(),
        }
    }
}

/// One payout received by an earlier voter. Append-only, informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEvent {
    pub timestamp: u64,
    pub subject_id: u32,
    pub amount: f64,
    /// The voter whose vote triggered this payout.
    pub from_user: String,
    pub vote_type: VoteType,
    /// 1-based rank within the filtered same-direction history.
    pub position: usize,
    pub tier: u8,
}

/// A user's balance and reward ledger. Created lazily on first vote or
/// first reward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub points: f64,
    pub up_vote_rewards: HashMap<u32, f64>,
    pub down_vote_rewards: HashMap<u32, f64>,
    pub reward_history: Vec<RewardEvent>,
}

impl UserAccount {
    pub fn new() -> Self {
        Self {
            points: INITIAL_POINTS,
            up_vote_rewards: HashMap::new(),
            down_vote_rewards: HashMap::new(),
            reward_history: Vec::new(),
        }
    }
}

impl Default for UserAccount {
    fn default() -> Self {
        Self::new()
    }
}

/// Static display data for the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl Profile {
    fn new(id: &str, name: &str, avatar: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            avatar: avatar.to_string(),
        }
    }
}

/// Root of the subjects document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectsDoc {
    pub subjects: Vec<Subject>,
}

impl SubjectsDoc {
    /// The fixed subject list served on first startup.
    pub fn seed() -> Self {
        Self {
            subjects: vec![
                Subject::new(1, "Kubernetes", "🚢"),
                Subject::new(2, "AWS Cloud", "☁️"),
                Subject::new(3, "Ubuntu Linux", "🐧"),
                Subject::new(4, "LangChain", "🔗"),
            ],
        }
    }
}

/// Root of the users document: static profiles plus the per-user accounts,
/// keyed by user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersDoc {
    pub profiles: Vec<Profile>,
    pub points: HashMap<String, UserAccount>,
}

impl UsersDoc {
    pub fn seed() -> Self {
        Self {
            profiles: vec![
                Profile::new("user1", "Alice", "👩‍💻"),
                Profile::new("user2", "Bob", "👨‍💻"),
                Profile::new("user3", "Charlie", "🧑‍💻"),
                Profile::new("user4", "Diana", "👩‍🔬"),
            ],
            points: HashMap::new(),
        }
    }
}

/// Current time as unix-epoch milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
