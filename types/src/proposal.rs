//! Proposal references and resolved thresholds.

use alloy_primitives::{Selector, U256};
use serde::{Deserialize, Serialize};

use crate::Decimal;

/// The slice of proposal state the quorum computation needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRef {
    pub id: u64,
    /// Number of enqueued transactions (indices `0..num_transactions`).
    pub num_transactions: u64,
    /// Total voting weight of the network at proposal time, in raw units.
    pub network_weight: U256,
}

impl ProposalRef {
    pub fn new(id: u64, num_transactions: u64, network_weight: U256) -> Self {
        Self {
            id,
            num_transactions,
            network_weight,
        }
    }
}

/// The constitutional threshold governing one proposal transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub selector: Selector,
    /// Required approval fraction in `[0, 1]`.
    pub fraction: Decimal,
}
