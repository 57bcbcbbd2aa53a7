//! The six workflow phases.
//!
//! The phase order is linear and strictly forward:
//! ```text
//! RegisteringVoters -> ProposalsRegistrationStarted -> ProposalsRegistrationEnded
//!   -> VotingSessionStarted -> VotingSessionEnded -> VotesTallied
//! ```
//! Every operation on the ballot is gated by the current phase, and only the
//! administrator advances it, one step at a time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A workflow phase.
///
/// The derived `Ord` follows declaration order, so `a < b` means `a` comes
/// earlier in the workflow.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Phase {
    /// The administrator is admitting voters.
    RegisteringVoters,
    /// Admitted voters may submit proposals.
    ProposalsRegistrationStarted,
    /// Proposal submission is closed; voting has not begun.
    ProposalsRegistrationEnded,
    /// Admitted voters may cast their vote.
    VotingSessionStarted,
    /// Voting is closed; the tally has not run.
    VotingSessionEnded,
    /// The tally ran; the winner is queryable.
    VotesTallied,
}

impl Phase {
    /// The phase that follows this one, or `None` for the terminal phase.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::RegisteringVoters => Some(Phase::ProposalsRegistrationStarted),
            Phase::ProposalsRegistrationStarted => Some(Phase::ProposalsRegistrationEnded),
            Phase::ProposalsRegistrationEnded => Some(Phase::VotingSessionStarted),
            Phase::VotingSessionStarted => Some(Phase::VotingSessionEnded),
            Phase::VotingSessionEnded => Some(Phase::VotesTallied),
            Phase::VotesTallied => None,
        }
    }

    /// Whether this is the terminal phase.
    pub fn is_terminal(self) -> bool {
        self == Phase::VotesTallied
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::RegisteringVoters
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::RegisteringVoters => "RegisteringVoters",
            Phase::ProposalsRegistrationStarted => "ProposalsRegistrationStarted",
            Phase::ProposalsRegistrationEnded => "ProposalsRegistrationEnded",
            Phase::VotingSessionStarted => "VotingSessionStarted",
            Phase::VotingSessionEnded => "VotingSessionEnded",
            Phase::VotesTallied => "VotesTallied",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_the_full_chain() {
        let mut phase = Phase::default();
        let mut seen = vec![phase];

        while let Some(next) = phase.next() {
            phase = next;
            seen.push(phase);
        }

        assert_eq!(
            seen,
            vec![
                Phase::RegisteringVoters,
                Phase::ProposalsRegistrationStarted,
                Phase::ProposalsRegistrationEnded,
                Phase::VotingSessionStarted,
                Phase::VotingSessionEnded,
                Phase::VotesTallied,
            ]
        );
        assert!(phase.is_terminal());
    }

    #[test]
    fn terminal_phase_has_no_successor() {
        assert_eq!(Phase::VotesTallied.next(), None);
    }

    #[test]
    fn ordering_matches_workflow_order() {
        let mut phase = Phase::default();
        while let Some(next) = phase.next() {
            assert!(phase < next);
            phase = next;
        }
    }
}
