//! Batched reads through Multicall3 `aggregate3`.

use std::sync::Arc;

use alloy_primitives::{address, Address, Bytes};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use ballot_chain::{CallOutcome, ChainError, ContractCall, MulticallClient};
use tracing::debug;

use crate::JsonRpcClient;

/// Canonical Multicall3 deployment, identical on every chain that has one.
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

sol! {
    interface IMulticall3 {
        struct Call3 {
            address target;
            bool allowFailure;
            bytes callData;
        }

        struct Result {
            bool success;
            bytes returnData;
        }

        function aggregate3(Call3[] calldata calls)
            external
            payable
            returns (Result[] memory returnData);
    }
}

/// Multicall client that wraps every batch in one `aggregate3` `eth_call`.
///
/// Every sub-call is sent with `allowFailure = true`, so a revert is reported
/// per call instead of failing the batch.
pub struct Multicall3 {
    rpc: Arc<JsonRpcClient>,
    address: Address,
}

impl Multicall3 {
    pub fn new(rpc: Arc<JsonRpcClient>) -> Self {
        Self::at(rpc, MULTICALL3_ADDRESS)
    }

    pub fn at(rpc: Arc<JsonRpcClient>, address: Address) -> Self {
        Self { rpc, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl MulticallClient for Multicall3 {
    async fn multicall(&self, calls: &[ContractCall]) -> Result<Vec<CallOutcome>, ChainError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }
        let wrapped = ContractCall::new(self.address, encode_aggregate3(calls));
        let data = self.rpc.eth_call(&wrapped).await?;
        let outcomes = decode_aggregate3(&data)?;
        debug!(calls = calls.len(), "multicall completed");
        Ok(outcomes)
    }
}

pub(crate) fn encode_aggregate3(calls: &[ContractCall]) -> Bytes {
    let call = IMulticall3::aggregate3Call {
        calls: calls
            .iter()
            .map(|c| IMulticall3::Call3 {
                target: c.target,
                allowFailure: true,
                callData: c.calldata.clone(),
            })
            .collect(),
    };
    call.abi_encode().into()
}

pub(crate) fn decode_aggregate3(data: &[u8]) -> Result<Vec<CallOutcome>, ChainError> {
    let ret = IMulticall3::aggregate3Call::abi_decode_returns(data, false)
        .map_err(|e| ChainError::Decode(format!("aggregate3 return data: {e}")))?;
    Ok(ret
        .returnData
        .into_iter()
        .map(|r| CallOutcome {
            success: r.success,
            return_data: r.returnData,
        })
        .collect())
}
