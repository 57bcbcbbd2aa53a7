//! Notifications emitted by successful ballot operations.
//!
//! Events are appended to an in-memory log owned by the [`Ballot`] and pushed
//! only after the corresponding mutation succeeds; a rejected operation never
//! leaves a trace here.
//!
//! [`Ballot`]: crate::Ballot

use serde::{Deserialize, Serialize};

use crate::{Phase, ProposalId, VoterId};

/// An observable side effect of a ballot operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The administrator advanced the workflow.
    PhaseChanged { from: Phase, to: Phase },
    /// A voter was admitted.
    VoterRegistered(VoterId),
    /// A proposal was appended under the given id.
    ProposalRegistered(ProposalId),
    /// A voter cast their vote.
    VoteCast { voter: VoterId, proposal: ProposalId },
}
