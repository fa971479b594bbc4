//! Proposal queries against one governance contract.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use ballot_chain::{ContractReader, EventFilter, LogSource, MulticallClient, RawLog};
use ballot_chain_jsonrpc::{JsonRpcClient, JsonRpcLogSource, Multicall3};
use ballot_governance::abi::event_topics;
use ballot_governance::{
    aggregate, decode_all, read_participation_parameters, ProposalTally, QuorumCalculator,
    ThresholdResolver,
};
use ballot_types::{Decimal, ParticipationParameters, ProposalRef, VoteCastRecord};
use tracing::{debug, info};

use crate::{ClientConfig, ClientError, QueryHandle};

/// Event whose logs withdraw a standing vote.
pub const REVOKE_EVENT: &str = "ProposalVoteRevoked";

pub struct GovernanceClient {
    chain_id: u64,
    governance: Address,
    vote_event: String,
    logs: Arc<dyn LogSource>,
    multicall: Arc<dyn MulticallClient>,
    reader: Arc<dyn ContractReader>,
    resolver: ThresholdResolver,
    calculator: QuorumCalculator,
}

impl GovernanceClient {
    /// Build a client over explicit collaborators.
    pub fn new(
        config: &ClientConfig,
        logs: Arc<dyn LogSource>,
        multicall: Arc<dyn MulticallClient>,
        reader: Arc<dyn ContractReader>,
    ) -> Self {
        Self {
            chain_id: config.chain_id,
            governance: config.governance_address,
            vote_event: config.vote_event.clone(),
            logs,
            multicall,
            reader,
            resolver: ThresholdResolver::new(config.governance_address)
                .with_fallback(config.default_threshold),
            calculator: QuorumCalculator::new(config.default_threshold),
        }
    }

    /// Build a client over the JSON-RPC backends described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let topics = |name: &str| {
            event_topics(name).ok_or_else(|| ClientError::Config(format!("unknown event {name:?}")))
        };

        let rpc = Arc::new(JsonRpcClient::with_timeout(
            config.rpc_url.clone(),
            config.request_timeout(),
        ));
        let logs = JsonRpcLogSource::new(Arc::clone(&rpc), config.governance_address, config.from_block)
            .register_event(config.vote_event.clone(), topics(&config.vote_event)?)
            .register_event(REVOKE_EVENT, topics(REVOKE_EVENT)?);
        let multicall = Multicall3::at(Arc::clone(&rpc), config.multicall_address);

        info!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            governance = %config.governance_address,
            "governance client configured"
        );
        Ok(Self::new(config, Arc::new(logs), Arc::new(multicall), rpc))
    }

    pub fn governance(&self) -> Address {
        self.governance
    }

    /// Quorum calculator carrying the configured default threshold.
    pub fn calculator(&self) -> &QuorumCalculator {
        &self.calculator
    }

    /// Current votes on proposal `id`.
    ///
    /// Id 0 means "no proposal" and yields an empty tally without any request.
    pub async fn proposal_voters(&self, id: u64) -> Result<ProposalTally, ClientError> {
        if id == 0 {
            return Ok(ProposalTally::default());
        }
        let filter = EventFilter::proposal(id);
        let (votes, revocations) = tokio::try_join!(
            self.logs.fetch_events(self.chain_id, &self.vote_event, &filter),
            self.logs.fetch_events(self.chain_id, REVOKE_EVENT, &filter),
        )?;

        let logs = chronological(votes, revocations);
        let records: Vec<VoteCastRecord> = decode_all(&logs)
            .into_iter()
            .filter(|record| record.proposal_id == id)
            .collect();
        let tally = aggregate(&records);
        debug!(
            proposal = id,
            logs = logs.len(),
            records = records.len(),
            voters = tally.voter_count(),
            "tallied proposal votes"
        );
        Ok(tally)
    }

    pub async fn participation_parameters(&self) -> Result<ParticipationParameters, ClientError> {
        Ok(read_participation_parameters(self.reader.as_ref(), self.governance).await?)
    }

    /// Threshold fraction of each transaction in `proposal`.
    pub async fn proposal_thresholds(
        &self,
        proposal: &ProposalRef,
    ) -> Result<Vec<Decimal>, ClientError> {
        Ok(self
            .resolver
            .resolve_thresholds(self.multicall.as_ref(), proposal)
            .await?)
    }

    /// Absolute quorum of `proposal`. Parameters and thresholds are read concurrently.
    pub async fn proposal_quorum(&self, proposal: &ProposalRef) -> Result<U256, ClientError> {
        let (params, thresholds) = tokio::try_join!(
            self.participation_parameters(),
            self.proposal_thresholds(proposal),
        )?;
        Ok(self.calculator.compute_quorum(proposal, &params, &thresholds)?)
    }

    /// Run [`Self::proposal_voters`] in the background.
    pub fn query_voters(self: &Arc<Self>, id: u64) -> QueryHandle<ProposalTally> {
        let client = Arc::clone(self);
        QueryHandle::spawn(async move { client.proposal_voters(id).await })
    }

    /// Run [`Self::proposal_quorum`] in the background.
    pub fn query_quorum(self: &Arc<Self>, proposal: ProposalRef) -> QueryHandle<U256> {
        let client = Arc::clone(self);
        QueryHandle::spawn(async move { client.proposal_quorum(&proposal).await })
    }
}

/// Merge vote and revocation logs into chain order. Logs without a position
/// keep their fetch order, votes before revocations.
fn chronological(votes: Vec<RawLog>, revocations: Vec<RawLog>) -> Vec<RawLog> {
    let mut logs = votes;
    logs.extend(revocations);
    logs.sort_by_key(|log| (log.block_number, log.log_index));
    logs
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U64;

    fn at(block: u64, index: u64, tag: u8) -> RawLog {
        let mut log = RawLog::new(vec![alloy_primitives::B256::repeat_byte(tag)], Vec::new());
        log.block_number = Some(U64::from(block));
        log.log_index = Some(U64::from(index));
        log
    }

    #[test]
    fn merges_by_block_then_index() {
        let merged = chronological(vec![at(5, 0, 1), at(9, 1, 2)], vec![at(5, 3, 3), at(9, 0, 4)]);
        let tags: Vec<u8> = merged.iter().map(|l| l.topics[0][0]).collect();
        assert_eq!(tags, vec![1, 3, 4, 2]);
    }

    #[test]
    fn unpositioned_logs_keep_fetch_order() {
        let vote = RawLog::new(vec![alloy_primitives::B256::repeat_byte(1)], Vec::new());
        let revoke = RawLog::new(vec![alloy_primitives::B256::repeat_byte(2)], Vec::new());
        let merged = chronological(vec![vote.clone()], vec![revoke.clone()]);
        assert_eq!(merged, vec![vote, revoke]);
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let config = ClientConfig {
            governance_address: Address::ZERO,
            ..ClientConfig::default()
        };
        assert!(matches!(
            GovernanceClient::from_config(&config),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn from_config_wires_json_rpc_backends() {
        let client = GovernanceClient::from_config(&ClientConfig::default()).unwrap();
        assert_eq!(client.governance(), ClientConfig::default().governance_address);
    }
}
