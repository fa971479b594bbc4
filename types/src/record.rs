//! Canonical vote record decoded from a governance event log.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::VoteAmounts;

/// Whether the log recorded a vote or the withdrawal of one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Cast,
    Revoke,
}

/// One vote event, normalized across event schema versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCastRecord {
    pub proposal_id: u64,
    pub account: Address,
    pub yes_votes: U256,
    pub no_votes: U256,
    pub abstain_votes: U256,
    pub action: VoteAction,
}

impl VoteCastRecord {
    /// The amounts carried by the event itself.
    pub fn amounts(&self) -> VoteAmounts {
        VoteAmounts::new(self.yes_votes, self.no_votes, self.abstain_votes)
    }

    /// The voter's standing vote after this event: the cast amounts, or nothing
    /// after a revocation.
    pub fn standing_amounts(&self) -> VoteAmounts {
        match self.action {
            VoteAction::Cast => self.amounts(),
            VoteAction::Revoke => VoteAmounts::ZERO,
        }
    }
}
