//! Vote recording and reward application over the flat-file documents.

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use crate::store::{JsonDocument, StoreError};
use crate::voting::rewards::payouts;
use crate::voting::types::{
    now_millis, Profile, RewardEvent, Subject, SubjectsDoc, UserAccount, UsersDoc, VoteRecord,
    VoteType, VOTE_COST,
};

#[derive(Error, Debug)]
pub enum VoteError {
    #[error("Not enough points to vote")]
    InsufficientPoints,
    #[error("Subject not found")]
    SubjectNotFound,
    #[error("You have already voted this way on this subject")]
    DuplicateVote,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a successful vote hands back to the caller: the refreshed subject
/// list and the voter's updated account.
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub subjects: Vec<Subject>,
    pub user: UserAccount,
    pub message: String,
}

/// Read-only view of the whole store, served by `GET /subjects`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub subjects: Vec<Subject>,
    pub users: HashMap<String, UserAccount>,
    pub profiles: Vec<Profile>,
}

/// Owns the subjects and users documents and runs every vote against them.
///
/// One engine instance is owned by the request-handling context; there is no
/// module-level store and no lazy re-initialization inside handlers.
pub struct VotingEngine {
    subjects: JsonDocument<SubjectsDoc>,
    users: JsonDocument<UsersDoc>,
}

impl VotingEngine {
    /// Opens both documents under `data_dir`, seeding defaults on first use.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            subjects: JsonDocument::open(data_dir.join("subjects.json"), SubjectsDoc::seed())?,
            users: JsonDocument::open(data_dir.join("users.json"), UsersDoc::seed())?,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            subjects: self.subjects.data().subjects.clone(),
            users: self.users.data().points.clone(),
            profiles: self.users.data().profiles.clone(),
        }
    }

    pub fn user(&self, user_id: &str) -> Option<&UserAccount> {
        self.users.data().points.get(user_id)
    }

    /// Restores both documents to their seed state.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        *self.subjects.data_mut() = SubjectsDoc::seed();
        *self.users.data_mut() = UsersDoc::seed();
        self.subjects.write()?;
        self.users.write()?;
        Ok(())
    }

    /// Records one vote: balance check, duplicate check, debit, tally and
    /// history append, persist, then best-effort reward distribution.
    ///
    /// A failure leaves everything committed by the steps before it in
    /// place; there is no compensating rollback.
    pub fn record_vote(
        &mut self,
        subject_id: u32,
        vote_type: VoteType,
        user_id: &str,
    ) -> Result<VoteOutcome, VoteError> {
        // Balance check against a lazily created account.
        let balance = self
            .users
            .data_mut()
            .points
            .entry(user_id.to_string())
            .or_insert_with(UserAccount::new)
            .points;
        if balance < VOTE_COST {
            return Err(VoteError::InsufficientPoints);
        }

        // Subject lookup and the (userId, voteType) duplicate check. The same
        // user voting the opposite direction is allowed through.
        let subject = self
            .subjects
            .data()
            .subjects
            .iter()
            .find(|s| s.id == subject_id)
            .ok_or(VoteError::SubjectNotFound)?;
        if subject
            .voter_history
            .iter()
            .any(|r| r.user_id == user_id && r.vote_type == vote_type)
        {
            return Err(VoteError::DuplicateVote);
        }

        // Debit the voter. Rewards never pay the current voter, so this clone
        // is already the account the caller gets back.
        let voter = {
            let account = self
                .users
                .data_mut()
                .points
                .entry(user_id.to_string())
                .or_insert_with(UserAccount::new);
            account.points -= VOTE_COST;
            account.clone()
        };

        // Tally, append the record, stamp the subject.
        let timestamp = now_millis();
        {
            let doc = self.subjects.data_mut();
            let subject = doc
                .subjects
                .iter_mut()
                .find(|s| s.id == subject_id)
                .ok_or(VoteError::SubjectNotFound)?;
            match vote_type {
                VoteType::Up => subject.votes.up += 1,
                VoteType::Down => subject.votes.down += 1,
            }
            let position = subject.voter_history.len() + 1;
            subject.voter_history.push(VoteRecord {
                user_id: user_id.to_string(),
                timestamp,
                points_spent: VOTE_COST,
                vote_type,
                position,
            });
            subject.last_updated = timestamp;
        }

        // Persist the subject update, then the debit.
        self.subjects.write()?;
        self.users.write()?;

        info!("Vote recorded: {user_id} voted {vote_type} on subject {subject_id}");

        // Reward distribution is best-effort: the vote above stays committed
        // even when the payout pass fails.
        if let Err(e) = self.distribute_rewards(subject_id, vote_type, user_id) {
            warn!("Reward distribution failed on subject {subject_id}: {e}");
        }

        Ok(VoteOutcome {
            subjects: self.subjects.data().subjects.clone(),
            user: voter,
            message: "Vote recorded successfully".to_string(),
        })
    }

    /// Pays every earlier same-direction voter their tier reward, updating
    /// balances, per-subject totals, and ledgers. All mutated accounts are
    /// flushed in one write at the end of the pass.
    fn distribute_rewards(
        &mut self,
        subject_id: u32,
        vote_type: VoteType,
        current_voter: &str,
    ) -> Result<(), StoreError> {
        let Some(subject) = self
            .subjects
            .data()
            .subjects
            .iter()
            .find(|s| s.id == subject_id)
        else {
            return Ok(());
        };

        let paid = payouts(&subject.voter_history, vote_type, current_voter);
        if paid.is_empty() {
            return Ok(());
        }

        let timestamp = now_millis();
        let users = self.users.data_mut();
        for payout in &paid {
            let account = users
                .points
                .entry(payout.user_id.clone())
                .or_insert_with(UserAccount::new);
            account.points += payout.amount;

            let per_subject = match vote_type {
                VoteType::Up => &mut account.up_vote_rewards,
                VoteType::Down => &mut account.down_vote_rewards,
            };
            *per_subject.entry(subject_id).or_insert(0.0) += payout.amount;

            account.reward_history.push(RewardEvent {
                timestamp,
                subject_id,
                amount: payout.amount,
                from_user: current_voter.to_string(),
                vote_type,
                position: payout.position,
                tier: payout.tier,
            });
        }

        info!(
            "Distributed {} rewards on subject {subject_id} for a {vote_type} vote by {current_voter}",
            paid.len()
        );
        self.users.write()
    }
}
