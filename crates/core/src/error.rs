//! Error types for ballot-core.

use thiserror::Error;

use crate::{Phase, ProposalId, VoterId};

/// Core errors.
///
/// Every rejection is synchronous and leaves the ballot untouched; the state
/// machine stays usable after any of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller is not the administrator.
    #[error("caller is not the administrator")]
    Unauthorized,

    /// Operation invoked outside its required phase.
    #[error("operation requires phase {required}, current phase is {current}")]
    PhaseViolation { required: Phase, current: Phase },

    /// Voter identity was already admitted.
    #[error("voter already registered: {0}")]
    DuplicateVoter(VoterId),

    /// Voter already submitted a proposal (single-proposal policy).
    #[error("voter already submitted a proposal: {0}")]
    DuplicateProposal(VoterId),

    /// Caller is not an admitted voter.
    #[error("voter not registered: {0}")]
    VoterNotRegistered(VoterId),

    /// Voter already cast their vote.
    #[error("voter already voted: {0}")]
    AlreadyVoted(VoterId),

    /// Proposal id does not reference an existing proposal.
    #[error("unknown proposal id: {0}")]
    InvalidProposal(ProposalId),

    /// Winner queried before the tally ran.
    #[error("votes have not been tallied")]
    TallyNotReady,

    /// Tally attempted with zero votes cast.
    #[error("nobody voted")]
    NoVotesCast,

    /// Command author has no key in the directory.
    #[error("unknown command author: {0}")]
    UnknownAuthor(VoterId),

    /// Command signature does not verify against the author's key.
    #[error("invalid signature for author: {0}")]
    InvalidSignature(VoterId),

    /// Bytes do not decode to an ed25519 verifying key.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(e: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for Error {
    fn from(e: ciborium::de::Error<std::io::Error>) -> Self {
        Error::Serialization(e.to_string())
    }
}
