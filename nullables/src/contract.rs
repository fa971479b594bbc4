//! Nullable contract reader: canned return data keyed by function selector.

use alloy_primitives::Bytes;
use async_trait::async_trait;
use ballot_chain::{ChainError, ContractCall, ContractReader};
use std::collections::HashMap;
use std::sync::Mutex;

pub struct NullContractReader {
    responses: Mutex<HashMap<[u8; 4], Bytes>>,
    failure: Mutex<Option<ChainError>>,
    calls: Mutex<Vec<ContractCall>>,
}

impl NullContractReader {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer calls to `selector` with `data`.
    pub fn respond(&self, selector: [u8; 4], data: impl Into<Bytes>) {
        self.responses.lock().unwrap().insert(selector, data.into());
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: ChainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<ContractCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for NullContractReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractReader for NullContractReader {
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
        self.calls.lock().unwrap().push(call.clone());
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        let selector = call
            .selector()
            .ok_or_else(|| ChainError::Other("call-data shorter than a selector".into()))?;
        self.responses
            .lock()
            .unwrap()
            .get(&selector)
            .cloned()
            .ok_or_else(|| ChainError::Rpc {
                code: 3,
                message: "execution reverted".into(),
            })
    }
}
