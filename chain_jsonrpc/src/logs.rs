//! Event logs by name over `eth_getLogs`.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, B256, U256, U64};
use async_trait::async_trait;
use ballot_chain::{ChainError, EventFilter, LogSource, RawLog};
use serde_json::{json, Value};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::JsonRpcClient;

/// Log source for one contract.
///
/// Event names are resolved through a registry of signature topics, so one
/// name can cover several schema versions of the same event.
pub struct JsonRpcLogSource {
    rpc: Arc<JsonRpcClient>,
    contract: Address,
    from_block: u64,
    events: HashMap<String, Vec<B256>>,
    node_chain_id: OnceCell<u64>,
}

impl JsonRpcLogSource {
    pub fn new(rpc: Arc<JsonRpcClient>, contract: Address, from_block: u64) -> Self {
        Self {
            rpc,
            contract,
            from_block,
            events: HashMap::new(),
            node_chain_id: OnceCell::new(),
        }
    }

    /// Map `name` to the signature topics it matches.
    pub fn register_event(mut self, name: impl Into<String>, topics: Vec<B256>) -> Self {
        self.events.insert(name.into(), topics);
        self
    }

    /// Build the `eth_getLogs` filter object.
    pub fn log_filter(&self, event_name: &str, filter: &EventFilter) -> Result<Value, ChainError> {
        let signatures = self
            .events
            .get(event_name)
            .ok_or_else(|| ChainError::UnknownEvent(event_name.to_string()))?;
        let proposal_topic = filter
            .proposal_id
            .map(|id| json!(B256::from(U256::from(id))))
            .unwrap_or(Value::Null);
        Ok(json!({
            "address": self.contract,
            "fromBlock": U64::from(self.from_block),
            "toBlock": "latest",
            "topics": [signatures, proposal_topic],
        }))
    }

    async fn ensure_chain(&self, expected: u64) -> Result<(), ChainError> {
        let got = *self
            .node_chain_id
            .get_or_try_init(|| self.rpc.chain_id())
            .await?;
        if got != expected {
            return Err(ChainError::ChainMismatch { expected, got });
        }
        Ok(())
    }
}

#[async_trait]
impl LogSource for JsonRpcLogSource {
    async fn fetch_events(
        &self,
        chain_id: u64,
        event_name: &str,
        filter: &EventFilter,
    ) -> Result<Vec<RawLog>, ChainError> {
        let log_filter = self.log_filter(event_name, filter)?;
        self.ensure_chain(chain_id).await?;
        let logs = self.rpc.eth_get_logs(log_filter).await?;
        debug!(event_name, count = logs.len(), "fetched logs");
        Ok(logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> JsonRpcLogSource {
        let rpc = Arc::new(JsonRpcClient::new("http://127.0.0.1:1"));
        JsonRpcLogSource::new(rpc, Address::repeat_byte(0x60), 100)
            .register_event("ProposalVoted", vec![B256::repeat_byte(1), B256::repeat_byte(2)])
    }

    #[test]
    fn filter_matches_every_schema_and_the_proposal() {
        let filter = source()
            .log_filter("ProposalVoted", &EventFilter::proposal(42))
            .unwrap();
        assert_eq!(filter["fromBlock"], json!("0x64"));
        assert_eq!(filter["toBlock"], json!("latest"));
        let topics = filter["topics"].as_array().unwrap();
        assert_eq!(topics[0].as_array().unwrap().len(), 2);
        let proposal: B256 = serde_json::from_value(topics[1].clone()).unwrap();
        assert_eq!(U256::from_be_bytes(proposal.0), U256::from(42u64));
    }

    #[test]
    fn filter_without_proposal_leaves_topic_open() {
        let filter = source()
            .log_filter("ProposalVoted", &EventFilter::default())
            .unwrap();
        assert_eq!(filter["topics"][1], Value::Null);
    }

    #[tokio::test]
    async fn unknown_event_fails_before_any_request() {
        let err = source()
            .fetch_events(42220, "Transfer", &EventFilter::default())
            .await
            .unwrap_err();
        assert_eq!(err, ChainError::UnknownEvent("Transfer".into()));
    }

    #[tokio::test]
    async fn chain_mismatch_is_reported() {
        let source = source();
        source.node_chain_id.set(1).unwrap();
        let err = source
            .fetch_events(42220, "ProposalVoted", &EventFilter::proposal(1))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChainError::ChainMismatch {
                expected: 42220,
                got: 1
            }
        );
    }
}
