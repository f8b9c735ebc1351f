//! Tiered payouts to earlier voters.
//!
//! When a vote lands, every earlier voter in the same direction is paid a
//! flat amount keyed to their rank among those earlier voters. The first ten
//! earn the most; each later tier pays less, which bounds the total payout of
//! a single vote to a small constant no matter how long the history grows.

use crate::voting::types::{VoteRecord, VoteType};

/// Highest rank in each tier, paired with the flat reward per rank.
const TIERS: [(usize, f64); 4] = [
    (10, 0.5),
    (100, 0.033),
    (1_000, 0.00167),
    (10_000, 0.000056),
];

/// Rewards below this are treated as zero and end the payout pass. Ranks pay
/// monotonically non-increasing amounts, so everything past the first miss is
/// below it too.
pub const MIN_REWARD_THRESHOLD: f64 = 0.000001;

/// The tier number and flat reward for a 1-based rank, or `None` past the
/// paid range.
pub fn tier_for(rank: usize) -> Option<(u8, f64)> {
    TIERS
        .iter()
        .enumerate()
        .find(|(_, (ceiling, _))| rank <= *ceiling)
        .map(|(i, (_, reward))| ((i + 1) as u8, *reward))
}

/// Flat reward for a 1-based rank; zero past the paid range.
pub fn tier_reward(rank: usize) -> f64 {
    tier_for(rank).map(|(_, reward)| reward).unwrap_or(0.0)
}

/// One computed payout within a distribution pass.
#[derive(Debug, Clone)]
pub struct Payout {
    pub user_id: String,
    pub amount: f64,
    /// 1-based rank within the filtered same-direction history.
    pub position: usize,
    pub tier: u8,
}

/// Selects the earlier same-direction voters (excluding the current voter)
/// and computes their tier payouts in chronological order.
///
/// Ranks are re-derived from the filtered order, not taken from the records'
/// stored `position`: the first same-direction voter other than the current
/// one is rank 1 regardless of where they sat in the subject-wide history.
pub fn payouts(history: &[VoteRecord], vote_type: VoteType, current_voter: &str) -> Vec<Payout> {
    let mut out = Vec::new();

    let earlier = history
        .iter()
        .filter(|r| r.vote_type == vote_type && r.user_id != current_voter);

    for (i, record) in earlier.enumerate() {
        let rank = i + 1;
        let reward = tier_reward(rank);
        if reward < MIN_REWARD_THRESHOLD {
            break;
        }
        let (tier, _) = tier_for(rank).unwrap_or((0, 0.0));
        out.push(Payout {
            user_id: record.user_id.clone(),
            amount: reward,
            position: rank,
            tier,
        });
    }

    out
}
