//! ballot-core: a single-organization ballot.
//!
//! An administrator drives a linear six-phase workflow: admit voters, collect
//! proposals, record one vote per voter, tally. Three pieces:
//! - [`Ballot`]: the owned aggregate — phase machine, voter registry,
//!   proposal list, tally result, notification log
//! - [`TallyResult`]: the one-time count with earliest-id tie-break
//! - [`Engine`]: authenticated command dispatch over a ballot
//!
//! The crate assumes a single-writer execution environment: one operation
//! completes fully before the next begins, so there is no internal locking.

mod ballot;
mod command;
mod engine;
mod error;
mod event;
mod identity;
mod phase;
mod tally;

pub use ballot::{Ballot, Policy, Proposal, ProposalId, Voter, BLANK_VOTE_DESCRIPTION};
pub use command::{Command, Op};
pub use engine::Engine;
pub use error::Error;
pub use event::Event;
pub use identity::{Hash, VoterId};
pub use phase::Phase;
pub use tally::TallyResult;

/// Re-export for convenience
pub use ed25519_dalek::{Signature, SigningKey, VerifyingKey};
