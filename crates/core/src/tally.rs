//! Vote counting.
//!
//! The tally scans proposals in ascending id order with a strict greater-than
//! comparison, so on a tie the proposal registered first keeps the win. The
//! blank slot is an ordinary proposal here: a blank majority wins the ballot.

use serde::{Deserialize, Serialize};

use crate::ballot::{Proposal, ProposalId};
use crate::Error;

/// The outcome of a completed tally. Computed once inside `tally_votes`,
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    /// Id of the winning proposal.
    pub winning_proposal: ProposalId,
    /// Description of the winning proposal.
    pub winning_description: String,
    /// Total number of votes cast across all proposals.
    pub total_votes: u64,
    /// Votes received by the winner.
    pub winning_vote_count: u64,
}

/// Count votes over proposals in id order.
///
/// Fails with [`Error::NoVotesCast`] when no vote was cast at all (including
/// the degenerate case of an empty proposal list).
pub(crate) fn count_votes(proposals: &[Proposal]) -> Result<TallyResult, Error> {
    let mut total_votes = 0u64;
    let mut winning_proposal: ProposalId = 0;
    let mut winning_vote_count = 0u64;

    for (id, proposal) in proposals.iter().enumerate() {
        total_votes += proposal.vote_count;
        if proposal.vote_count > winning_vote_count {
            winning_vote_count = proposal.vote_count;
            winning_proposal = id;
        }
    }

    if total_votes == 0 {
        return Err(Error::NoVotesCast);
    }

    Ok(TallyResult {
        winning_proposal,
        winning_description: proposals[winning_proposal].description.clone(),
        total_votes,
        winning_vote_count,
    })
}
