//! Signed command envelope.
//!
//! The ballot itself checks roles against identities; the command layer is
//! what binds an identity to a caller. A `Command` carries one requested
//! operation, signed by its author over a CBOR encoding that excludes the id
//! and signature fields, in the same scheme the key directory verifies.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::{Hash, ProposalId, VoterId};

/// An operation requested of the ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Admit the voter whose verifying key this is (administrator only).
    AdmitVoter { public_key: [u8; 32] },
    /// Open proposal registration (administrator only).
    StartProposalsRegistration,
    /// Close proposal registration (administrator only).
    EndProposalsRegistration,
    /// Open the voting session (administrator only).
    StartVotingSession,
    /// Close the voting session (administrator only).
    EndVotingSession,
    /// Submit a proposal (admitted voters only).
    RegisterProposal { description: String },
    /// Cast a vote for a proposal (admitted voters only).
    CastVote { proposal: ProposalId },
    /// Run the tally (administrator only).
    TallyVotes,
}

/// A signed request to perform one ballot operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Command {
    /// Content hash (computed, not part of the signed content).
    #[serde(skip)]
    pub id: Hash,

    /// Who is requesting the operation.
    pub author: VoterId,

    /// The requested operation.
    pub op: Op,

    /// Ed25519 signature over the command content.
    pub signature: Vec<u8>,

    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl Command {
    /// Create a new command and sign it.
    pub fn new(author: VoterId, op: Op, signing_key: &SigningKey) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut command = Self {
            id: Hash::ZERO,
            author,
            op,
            signature: Vec::new(),
            timestamp,
        };

        let content = command.signable_content();
        let signature = signing_key.sign(&content);
        command.signature = signature.to_bytes().to_vec();
        command.id = command.compute_id();

        command
    }

    /// Get the content to be signed (excludes id and signature).
    fn signable_content(&self) -> Vec<u8> {
        let signable = SignableCommand {
            author: &self.author,
            op: &self.op,
            timestamp: self.timestamp,
        };

        let mut buf = Vec::new();
        ciborium::into_writer(&signable, &mut buf).expect("serialization should not fail");
        buf
    }

    /// Compute the content hash of this command.
    pub fn compute_id(&self) -> Hash {
        Hash::of(&self.signable_content())
    }

    /// Recompute and set the id field.
    pub fn refresh_id(&mut self) {
        self.id = self.compute_id();
    }

    /// Verify the command's signature against a public key.
    pub fn verify_signature(&self, public_key: &VerifyingKey) -> bool {
        let sig_bytes: [u8; 64] = match self.signature.as_slice().try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let signature = Signature::from_bytes(&sig_bytes);

        let content = self.signable_content();
        public_key.verify(&content, &signature).is_ok()
    }
}

/// Helper struct for signing (excludes mutable fields).
#[derive(Serialize)]
struct SignableCommand<'a> {
    author: &'a VoterId,
    op: &'a Op,
    timestamp: u64,
}
