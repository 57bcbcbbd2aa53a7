//! The ballot aggregate: voter registry, proposal list, and phase gating.
//!
//! One `Ballot` value is one election. It owns all mutable state (current
//! phase, voters, proposals, tally result, event log) and is mutated only
//! through the operations below. Operations are all-or-nothing: every check
//! runs before the first mutation, so a rejected call leaves the ballot
//! exactly as it was.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tally;
use crate::{Error, Event, Phase, TallyResult, VoterId};

/// A proposal's position in the registration sequence, starting at 0.
pub type ProposalId = usize;

/// Description of the reserved abstention slot at index 0.
pub const BLANK_VOTE_DESCRIPTION: &str = "Blank vote";

/// Per-voter record. Presence in the registry means the voter is admitted;
/// voters are never removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Whether the voter has submitted a proposal.
    pub has_proposed: bool,
    /// Whether the voter has cast their vote.
    pub has_voted: bool,
    /// The proposal the voter chose, once voted.
    pub voted_proposal: Option<ProposalId>,
}

/// A registered proposal. Append-only and immutable once created, except for
/// `vote_count` increments during the voting session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Free-form proposal text.
    pub description: String,
    /// Number of votes received so far.
    pub vote_count: u64,
}

impl Proposal {
    fn new(description: String) -> Self {
        Self {
            description,
            vote_count: 0,
        }
    }
}

/// Ballot policy knobs.
///
/// The blank-vote slot at index 0 is not a knob: it is always created when
/// proposal registration starts, matching the reference behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Reject a second proposal from the same voter. Off by default.
    pub single_proposal_per_voter: bool,
}

/// A single election: phase machine plus ballot store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ballot {
    admin: VoterId,
    policy: Policy,
    phase: Phase,
    voters: BTreeMap<VoterId, Voter>,
    proposals: Vec<Proposal>,
    votes_cast: u64,
    result: Option<TallyResult>,
    events: Vec<Event>,
}

impl Ballot {
    /// Create a fresh ballot with the default policy. The administrator is
    /// not a voter; admit them explicitly if they should vote.
    pub fn new(admin: VoterId) -> Self {
        Self::with_policy(admin, Policy::default())
    }

    /// Create a fresh ballot with an explicit policy.
    pub fn with_policy(admin: VoterId, policy: Policy) -> Self {
        Self {
            admin,
            policy,
            phase: Phase::default(),
            voters: BTreeMap::new(),
            proposals: Vec::new(),
            votes_cast: 0,
            result: None,
            events: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Read surface (callable by anyone, any phase unless noted)
    // -------------------------------------------------------------------------

    /// The current workflow phase.
    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    /// The administrator identity.
    pub fn admin(&self) -> VoterId {
        self.admin
    }

    /// The active policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Whether the identity has been admitted.
    pub fn is_registered(&self, id: VoterId) -> bool {
        self.voters.contains_key(&id)
    }

    /// The record for an admitted voter.
    pub fn voter(&self, id: VoterId) -> Option<&Voter> {
        self.voters.get(&id)
    }

    /// Number of admitted voters.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// A proposal by id.
    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// All proposals in registration order (index 0 is the blank slot once
    /// proposal registration has started).
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Number of registered proposals, blank slot included.
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Number of votes successfully cast so far.
    pub fn votes_cast(&self) -> u64 {
        self.votes_cast
    }

    /// The notification log, in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The stored tally result. Fails with [`Error::TallyNotReady`] until
    /// `tally_votes` has run; never recomputes.
    pub fn winning_proposal(&self) -> Result<&TallyResult, Error> {
        self.result.as_ref().ok_or(Error::TallyNotReady)
    }

    // -------------------------------------------------------------------------
    // Workflow transitions (administrator only)
    // -------------------------------------------------------------------------

    /// Open proposal registration. Creates the blank-vote slot at index 0.
    pub fn start_proposals_registration(&mut self, caller: VoterId) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_phase(Phase::RegisteringVoters)?;

        // Reserved abstention slot; voter proposals start at id 1.
        self.proposals
            .push(Proposal::new(BLANK_VOTE_DESCRIPTION.to_string()));
        self.advance(Phase::ProposalsRegistrationStarted);
        Ok(())
    }

    /// Close proposal registration.
    pub fn end_proposals_registration(&mut self, caller: VoterId) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_phase(Phase::ProposalsRegistrationStarted)?;
        self.advance(Phase::ProposalsRegistrationEnded);
        Ok(())
    }

    /// Open the voting session.
    pub fn start_voting_session(&mut self, caller: VoterId) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_phase(Phase::ProposalsRegistrationEnded)?;
        self.advance(Phase::VotingSessionStarted);
        Ok(())
    }

    /// Close the voting session.
    pub fn end_voting_session(&mut self, caller: VoterId) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_phase(Phase::VotingSessionStarted)?;
        self.advance(Phase::VotingSessionEnded);
        Ok(())
    }

    /// Run the tally and store the result. Single-shot: `VotesTallied` has no
    /// successor, so a repeat call fails with a phase violation.
    pub fn tally_votes(&mut self, caller: VoterId) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_phase(Phase::VotingSessionEnded)?;

        let result = tally::count_votes(&self.proposals)?;
        self.result = Some(result);
        self.advance(Phase::VotesTallied);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Registry operations
    // -------------------------------------------------------------------------

    /// Admit a voter. Administrator only, `RegisteringVoters` phase only,
    /// at most once per identity.
    pub fn admit_voter(&mut self, caller: VoterId, voter: VoterId) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_phase(Phase::RegisteringVoters)?;
        if self.voters.contains_key(&voter) {
            return Err(Error::DuplicateVoter(voter));
        }

        self.voters.insert(voter, Voter::default());
        self.events.push(Event::VoterRegistered(voter));
        Ok(())
    }

    /// Append a proposal on behalf of an admitted voter. Returns the new id.
    ///
    /// The phase is checked before the caller's registration, matching the
    /// reference: an unregistered caller outside the proposal session gets
    /// the phase violation, not `VoterNotRegistered`.
    pub fn register_proposal(
        &mut self,
        caller: VoterId,
        description: impl Into<String>,
    ) -> Result<ProposalId, Error> {
        self.require_phase(Phase::ProposalsRegistrationStarted)?;
        let voter = self
            .voters
            .get_mut(&caller)
            .ok_or(Error::VoterNotRegistered(caller))?;
        if self.policy.single_proposal_per_voter && voter.has_proposed {
            return Err(Error::DuplicateProposal(caller));
        }

        voter.has_proposed = true;
        let id = self.proposals.len();
        self.proposals.push(Proposal::new(description.into()));
        self.events.push(Event::ProposalRegistered(id));
        Ok(id)
    }

    /// Record a vote for `proposal` on behalf of an admitted voter.
    pub fn cast_vote(&mut self, caller: VoterId, proposal: ProposalId) -> Result<(), Error> {
        self.require_phase(Phase::VotingSessionStarted)?;
        let voter = self
            .voters
            .get_mut(&caller)
            .ok_or(Error::VoterNotRegistered(caller))?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted(caller));
        }
        let slot = self
            .proposals
            .get_mut(proposal)
            .ok_or(Error::InvalidProposal(proposal))?;

        slot.vote_count += 1;
        voter.has_voted = true;
        voter.voted_proposal = Some(proposal);
        self.votes_cast += 1;
        self.events.push(Event::VoteCast {
            voter: caller,
            proposal,
        });
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn require_admin(&self, caller: VoterId) -> Result<(), Error> {
        if caller != self.admin {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn require_phase(&self, required: Phase) -> Result<(), Error> {
        if self.phase != required {
            return Err(Error::PhaseViolation {
                required,
                current: self.phase,
            });
        }
        Ok(())
    }

    /// Advance to the next phase and emit the change notification.
    fn advance(&mut self, to: Phase) {
        debug_assert_eq!(self.phase.next(), Some(to), "phases advance one step");
        let from = self.phase;
        self.phase = to;
        self.events.push(Event::PhaseChanged { from, to });
    }
}
