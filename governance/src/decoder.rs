//! Vote event log decoding.
//!
//! Each raw log is classified by its own signature topic into a closed set of
//! known event shapes, then mapped to a canonical [`VoteCastRecord`]. A log
//! that cannot be decoded is dropped and logged; it never aborts the batch.

use alloy_primitives::{B256, U256};
use alloy_sol_types::SolEvent;
use ballot_chain::RawLog;
use ballot_types::{VoteAction, VoteAmounts, VoteCastRecord, VoteType};
use thiserror::Error;
use tracing::{debug, warn};

use crate::abi::{ProposalVoteRevoked, ProposalVoteRevokedV2, ProposalVoted, ProposalVotedV2};

/// Signature topic plus the two indexed parameters.
const MIN_TOPICS: usize = 3;

#[derive(Debug, Error)]
pub enum LogDecodeError {
    #[error("log has {0} topics, expected at least {MIN_TOPICS}")]
    TooFewTopics(usize),

    #[error("unrecognized event signature {0}")]
    UnknownSchema(B256),

    #[error("malformed log: {0}")]
    Malformed(String),

    #[error("account topic is not a valid address: {0}")]
    InvalidAccount(B256),

    #[error("proposal id is zero")]
    ZeroProposalId,
}

/// A log decoded against one of the known event shapes.
#[derive(Debug)]
pub enum DecodedVoteEvent {
    V1Cast(ProposalVoted),
    V1Revoke(ProposalVoteRevoked),
    V2Cast(ProposalVotedV2),
    V2Revoke(ProposalVoteRevokedV2),
    Unrecognized(B256),
}

impl DecodedVoteEvent {
    /// Decode `log` by dispatching on its signature topic.
    pub fn classify(log: &RawLog) -> Result<Self, LogDecodeError> {
        if log.topics.len() < MIN_TOPICS {
            return Err(LogDecodeError::TooFewTopics(log.topics.len()));
        }
        let signature = log.topics[0];
        if is_vote_signature(&signature) {
            check_account_topic(log)?;
        }
        let topics = log.topics.iter().copied();
        let data = log.data.as_ref();
        let malformed = |e: alloy_sol_types::Error| LogDecodeError::Malformed(e.to_string());

        let event = if signature == ProposalVoted::SIGNATURE_HASH {
            Self::V1Cast(ProposalVoted::decode_raw_log(topics, data, false).map_err(malformed)?)
        } else if signature == ProposalVoteRevoked::SIGNATURE_HASH {
            Self::V1Revoke(
                ProposalVoteRevoked::decode_raw_log(topics, data, false).map_err(malformed)?,
            )
        } else if signature == ProposalVotedV2::SIGNATURE_HASH {
            Self::V2Cast(ProposalVotedV2::decode_raw_log(topics, data, false).map_err(malformed)?)
        } else if signature == ProposalVoteRevokedV2::SIGNATURE_HASH {
            Self::V2Revoke(
                ProposalVoteRevokedV2::decode_raw_log(topics, data, false).map_err(malformed)?,
            )
        } else {
            Self::Unrecognized(signature)
        };
        Ok(event)
    }

    /// Map to the canonical record. Total over every variant.
    pub fn into_record(self) -> Result<VoteCastRecord, LogDecodeError> {
        let (proposal_id, account, amounts, action) = match self {
            Self::V1Cast(e) => (
                e.proposalId,
                e.account,
                legacy_amounts(e.value, e.weight),
                VoteAction::Cast,
            ),
            Self::V1Revoke(e) => (
                e.proposalId,
                e.account,
                legacy_amounts(e.value, e.weight),
                VoteAction::Revoke,
            ),
            Self::V2Cast(e) => (
                e.proposalId,
                e.account,
                VoteAmounts::new(e.yesVotes, e.noVotes, e.abstainVotes),
                VoteAction::Cast,
            ),
            Self::V2Revoke(e) => (
                e.proposalId,
                e.account,
                VoteAmounts::new(e.yesVotes, e.noVotes, e.abstainVotes),
                VoteAction::Revoke,
            ),
            Self::Unrecognized(signature) => return Err(LogDecodeError::UnknownSchema(signature)),
        };

        if proposal_id.is_zero() {
            return Err(LogDecodeError::ZeroProposalId);
        }
        let proposal_id = u64::try_from(proposal_id)
            .map_err(|_| LogDecodeError::Malformed(format!("proposal id {proposal_id} out of range")))?;

        Ok(VoteCastRecord {
            proposal_id,
            account,
            yes_votes: amounts.yes,
            no_votes: amounts.no,
            abstain_votes: amounts.abstain,
            action,
        })
    }
}

/// Place `weight` in the bucket named by the legacy vote value. Unknown values
/// carry no weight.
fn legacy_amounts(value: U256, weight: U256) -> VoteAmounts {
    u64::try_from(value)
        .ok()
        .and_then(VoteType::from_legacy_value)
        .map(|vote| VoteAmounts::single(vote, weight))
        .unwrap_or_default()
}

fn is_vote_signature(signature: &B256) -> bool {
    [
        ProposalVoted::SIGNATURE_HASH,
        ProposalVoteRevoked::SIGNATURE_HASH,
        ProposalVotedV2::SIGNATURE_HASH,
        ProposalVoteRevokedV2::SIGNATURE_HASH,
    ]
    .contains(signature)
}

/// The account topic must be a left-padded 20-byte address.
fn check_account_topic(log: &RawLog) -> Result<(), LogDecodeError> {
    let topic = log.topics[2];
    if topic[..12].iter().any(|b| *b != 0) {
        return Err(LogDecodeError::InvalidAccount(topic));
    }
    Ok(())
}

/// Decode one log, surfacing why it was rejected.
pub fn try_decode(log: &RawLog) -> Result<VoteCastRecord, LogDecodeError> {
    DecodedVoteEvent::classify(log)?.into_record()
}

/// Decode one log, or `None` if it is not a usable vote record.
pub fn decode(log: &RawLog) -> Option<VoteCastRecord> {
    match try_decode(log) {
        Ok(record) => Some(record),
        Err(LogDecodeError::UnknownSchema(signature)) => {
            warn!(%signature, "invalid event name, expected a proposal vote event");
            None
        }
        Err(e @ LogDecodeError::Malformed(_)) => {
            warn!(error = %e, ?log, "error decoding event log");
            None
        }
        Err(e) => {
            debug!(error = %e, "skipping vote log");
            None
        }
    }
}

/// Decode a batch, preserving order and skipping unusable logs.
pub fn decode_all<'a, I>(logs: I) -> Vec<VoteCastRecord>
where
    I: IntoIterator<Item = &'a RawLog>,
{
    logs.into_iter().filter_map(decode).collect()
}
