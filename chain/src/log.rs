//! Raw event logs as returned by a log source.

use alloy_primitives::{Bytes, B256, U64};
use serde::{Deserialize, Serialize};

/// An undecoded log entry.
///
/// `topics[0]` is the event signature hash for non-anonymous events, the
/// remaining topics are indexed parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_index: Option<U64>,
}

impl RawLog {
    pub fn new(topics: Vec<B256>, data: impl Into<Bytes>) -> Self {
        Self {
            topics,
            data: data.into(),
            block_number: None,
            log_index: None,
        }
    }

    pub fn signature(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// Narrowing applied when fetching logs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub proposal_id: Option<u64>,
}

impl EventFilter {
    pub fn proposal(id: u64) -> Self {
        Self {
            proposal_id: Some(id),
        }
    }
}
