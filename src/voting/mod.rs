//! The voting core: data model, tiered reward distribution, and the
//! vote-recording engine.

pub mod engine;
pub mod rewards;
pub mod types;

pub use engine::{Snapshot, VoteError, VoteOutcome, VotingEngine};
pub use types::{
    Profile, RewardEvent, Subject, SubjectsDoc, UserAccount, UsersDoc, VoteRecord, VoteTally,
    VoteType, INITIAL_POINTS, VOTE_COST,
};
