//! The ballot engine: verifies signed commands and applies them.
//!
//! The engine owns one [`Ballot`], the directory of verifying keys it has
//! learned (the administrator's at construction, each voter's at admission),
//! and the history of applied commands. `submit` is the single entry point:
//! verify, dispatch, record. A failed command changes nothing and is not
//! recorded.

use ed25519_dalek::VerifyingKey;
use std::collections::BTreeMap;

use crate::{Ballot, Command, Error, Event, Op, Phase, Policy, TallyResult, VoterId};

/// Drives a [`Ballot`] through authenticated commands.
pub struct Engine {
    /// The election state.
    ballot: Ballot,

    /// Verifying keys by identity.
    keys: BTreeMap<VoterId, VerifyingKey>,

    /// Applied commands, in order of application.
    history: Vec<Command>,
}

impl Engine {
    /// Create an engine for a fresh election run by the holder of `admin_key`.
    pub fn new(admin_key: VerifyingKey) -> Self {
        Self::with_policy(admin_key, Policy::default())
    }

    /// Create an engine with an explicit ballot policy.
    pub fn with_policy(admin_key: VerifyingKey, policy: Policy) -> Self {
        let admin = VoterId::from_key(&admin_key);
        let mut keys = BTreeMap::new();
        keys.insert(admin, admin_key);

        Self {
            ballot: Ballot::with_policy(admin, policy),
            keys,
            history: Vec::new(),
        }
    }

    /// The underlying ballot (read-only).
    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    /// Applied commands, oldest first.
    pub fn history(&self) -> &[Command] {
        &self.history
    }

    /// The verifying key recorded for an identity, if any.
    pub fn public_key(&self, id: VoterId) -> Option<&VerifyingKey> {
        self.keys.get(&id)
    }

    /// Current workflow phase.
    pub fn current_phase(&self) -> Phase {
        self.ballot.current_phase()
    }

    /// Notification log of the underlying ballot.
    pub fn events(&self) -> &[Event] {
        self.ballot.events()
    }

    /// The stored tally result, once `TallyVotes` has been applied.
    pub fn winning_proposal(&self) -> Result<&TallyResult, Error> {
        self.ballot.winning_proposal()
    }

    /// Verify and apply one command.
    ///
    /// The author must already be known to the key directory and the
    /// signature must verify against their key; role and phase checks are
    /// then the ballot's business.
    pub fn submit(&mut self, mut command: Command) -> Result<(), Error> {
        command.refresh_id();

        let key = self
            .keys
            .get(&command.author)
            .ok_or(Error::UnknownAuthor(command.author))?;
        if !command.verify_signature(key) {
            return Err(Error::InvalidSignature(command.author));
        }

        match &command.op {
            Op::AdmitVoter { public_key } => {
                let key =
                    VerifyingKey::from_bytes(public_key).map_err(|_| Error::InvalidPublicKey)?;
                let voter = VoterId::from_key(&key);
                self.ballot.admit_voter(command.author, voter)?;
                self.keys.insert(voter, key);
            }
            Op::StartProposalsRegistration => {
                self.ballot.start_proposals_registration(command.author)?;
            }
            Op::EndProposalsRegistration => {
                self.ballot.end_proposals_registration(command.author)?;
            }
            Op::StartVotingSession => {
                self.ballot.start_voting_session(command.author)?;
            }
            Op::EndVotingSession => {
                self.ballot.end_voting_session(command.author)?;
            }
            Op::RegisterProposal { description } => {
                self.ballot
                    .register_proposal(command.author, description.clone())?;
            }
            Op::CastVote { proposal } => {
                self.ballot.cast_vote(command.author, *proposal)?;
            }
            Op::TallyVotes => {
                self.ballot.tally_votes(command.author)?;
            }
        }

        self.history.push(command);
        Ok(())
    }
}
