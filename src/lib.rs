/*!
Kaulvote - a points-and-rewards voting service

This crate implements a small up/down voting application backed by flat-file
JSON documents. Voters spend points to vote; earlier voters in the same
direction are paid tiered rewards whenever a later vote lands, so voting
early on a subject is worth more than piling on.

# Main Components

- `voting`: Data model, the tiered reward distributor, and the vote-recording engine
- `store`: Flat-file JSON document persistence
- `server`: HTTP surface (subjects, votes, login stub, legacy counter)
- `counter`: Legacy increment-counter service
- `config`: Environment-driven configuration
- `cli`: Command-line interface for running and administering the service
*/

/// Command-line interface for running and administering the service.
pub mod cli;

/// Environment-driven configuration.
pub mod config;

/// Legacy increment-counter service.
pub mod counter;

/// HTTP surface: router, handlers, error mapping.
pub mod server;

/// Flat-file JSON document persistence.
pub mod store;

/// The voting core: data model, rewards, and the engine.
pub mod voting;

// Re-export commonly used types
pub use counter::CounterStore;
pub use store::{JsonDocument, StoreError};
pub use voting::engine::{VoteError, VoteOutcome, VotingEngine};
pub use voting::types::{Subject, UserAccount, VoteRecord, VoteType};
