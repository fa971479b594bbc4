//! Constitutional threshold resolution.
//!
//! Every transaction enqueued in a proposal is governed by the constitution
//! entry for its destination and function selector. Resolution takes exactly
//! two multicall round trips, whatever the number of transactions:
//!
//! 1. `getProposalTransaction(id, i)` for every index, to learn destination and call-data;
//! 2. `getConstitution(destination, selector)` for every transaction, followed
//!    by one probe for an address with no rules, which yields the contract's
//!    default threshold.
//!
//! Reverted sub-calls fall back to that default. A batch-level failure aborts
//! the whole resolution; partial results are never returned.

use alloy_primitives::{Address, Bytes, Selector, U256};
use alloy_sol_types::SolCall;
use ballot_chain::{CallOutcome, ChainError, ContractCall, MulticallClient};
use ballot_types::{from_fixed, selector_from_calldata, Decimal, ProposalRef, ThresholdEntry};
use tracing::{debug, warn};

use crate::abi::{getConstitutionCall, getProposalTransactionCall};
use crate::quorum::DEFAULT_THRESHOLD;
use crate::GovernanceError;

/// A proposal transaction as far as threshold lookup is concerned.
struct EnqueuedTransaction {
    destination: Address,
    selector: Selector,
}

/// Resolves the threshold fraction of each transaction in a proposal.
#[derive(Clone, Debug)]
pub struct ThresholdResolver {
    governance: Address,
    /// Used only when the contract's own default cannot be read.
    fallback: Decimal,
}

impl ThresholdResolver {
    pub fn new(governance: Address) -> Self {
        Self {
            governance,
            fallback: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_fallback(mut self, fallback: Decimal) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn governance(&self) -> Address {
        self.governance
    }

    /// Threshold fraction per transaction, in transaction order.
    pub async fn resolve_thresholds(
        &self,
        multicall: &dyn MulticallClient,
        proposal: &ProposalRef,
    ) -> Result<Vec<Decimal>, GovernanceError> {
        Ok(self
            .resolve_entries(multicall, proposal)
            .await?
            .into_iter()
            .map(|entry| entry.fraction)
            .collect())
    }

    /// Selector and threshold fraction per transaction, in transaction order.
    pub async fn resolve_entries(
        &self,
        multicall: &dyn MulticallClient,
        proposal: &ProposalRef,
    ) -> Result<Vec<ThresholdEntry>, GovernanceError> {
        if proposal.num_transactions == 0 {
            return Ok(Vec::new());
        }

        let transactions = self.fetch_transactions(multicall, proposal).await?;

        let mut lookups = Vec::with_capacity(transactions.len() + 1);
        let mut lookup_slots = Vec::with_capacity(transactions.len());
        for tx in &transactions {
            lookup_slots.push(tx.as_ref().map(|tx| {
                lookups.push(self.constitution_call(tx.destination, tx.selector));
                lookups.len() - 1
            }));
        }
        lookups.push(self.constitution_call(Address::ZERO, Selector::ZERO));

        let outcomes = execute(multicall, &lookups).await?;
        let default = outcomes
            .last()
            .and_then(decode_threshold)
            .unwrap_or_else(|| {
                warn!(fallback = %self.fallback, "default threshold probe reverted");
                self.fallback
            });

        let entries = transactions
            .iter()
            .zip(lookup_slots)
            .enumerate()
            .map(|(index, (tx, slot))| {
                let selector = tx.as_ref().map(|tx| tx.selector).unwrap_or(Selector::ZERO);
                let fraction = match slot.and_then(|slot| decode_threshold(&outcomes[slot])) {
                    Some(fraction) => fraction,
                    None => {
                        warn!(proposal = proposal.id, index, %default, "threshold lookup failed, using default");
                        default
                    }
                };
                ThresholdEntry { selector, fraction }
            })
            .collect();

        debug!(proposal = proposal.id, count = transactions.len(), "resolved thresholds");
        Ok(entries)
    }

    async fn fetch_transactions(
        &self,
        multicall: &dyn MulticallClient,
        proposal: &ProposalRef,
    ) -> Result<Vec<Option<EnqueuedTransaction>>, GovernanceError> {
        let calls: Vec<_> = (0..proposal.num_transactions)
            .map(|index| {
                let call = getProposalTransactionCall {
                    proposalId: U256::from(proposal.id),
                    index: U256::from(index),
                };
                ContractCall::new(self.governance, call.abi_encode())
            })
            .collect();

        let outcomes = execute(multicall, &calls).await?;
        Ok(outcomes
            .iter()
            .enumerate()
            .map(|(index, outcome)| {
                let tx = decode_transaction(outcome);
                if tx.is_none() {
                    warn!(proposal = proposal.id, index, "could not read proposal transaction");
                }
                tx
            })
            .collect())
    }

    fn constitution_call(&self, destination: Address, selector: Selector) -> ContractCall {
        let call = getConstitutionCall {
            destination,
            functionId: selector,
        };
        ContractCall::new(self.governance, call.abi_encode())
    }
}

/// Run one batch and insist on one outcome per call.
async fn execute(
    multicall: &dyn MulticallClient,
    calls: &[ContractCall],
) -> Result<Vec<CallOutcome>, GovernanceError> {
    let outcomes = multicall.multicall(calls).await?;
    if outcomes.len() != calls.len() {
        return Err(ChainError::LengthMismatch {
            expected: calls.len(),
            got: outcomes.len(),
        }
        .into());
    }
    Ok(outcomes)
}

fn decode_transaction(outcome: &CallOutcome) -> Option<EnqueuedTransaction> {
    let data = outcome.data()?;
    let ret = getProposalTransactionCall::abi_decode_returns(data, false).ok()?;
    let calldata: &Bytes = &ret.data;
    Some(EnqueuedTransaction {
        destination: ret.destination,
        selector: selector_from_calldata(calldata),
    })
}

fn decode_threshold(outcome: &CallOutcome) -> Option<Decimal> {
    let data = outcome.data()?;
    let ret = getConstitutionCall::abi_decode_returns(data, false).ok()?;
    Some(from_fixed(ret.threshold))
}
