//! Nullable multicall: answer batches from a closure and count round trips.

use async_trait::async_trait;
use ballot_chain::{CallOutcome, ChainError, ContractCall, MulticallClient};
use std::sync::Mutex;

type Responder =
    Box<dyn Fn(&[ContractCall]) -> Result<Vec<CallOutcome>, ChainError> + Send + Sync>;

/// A multicall client whose answers are computed by a test-supplied closure.
pub struct NullMulticall {
    responder: Responder,
    batches: Mutex<Vec<Vec<ContractCall>>>,
}

impl NullMulticall {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&[ContractCall]) -> Result<Vec<CallOutcome>, ChainError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            batches: Mutex::new(Vec::new()),
        }
    }

    /// Every call reverts.
    pub fn reverting() -> Self {
        Self::with_responder(|calls| Ok(calls.iter().map(|_| CallOutcome::reverted()).collect()))
    }

    /// Number of batches (round trips) received.
    pub fn call_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    /// All batches received, in order.
    pub fn batches(&self) -> Vec<Vec<ContractCall>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MulticallClient for NullMulticall {
    async fn multicall(&self, calls: &[ContractCall]) -> Result<Vec<CallOutcome>, ChainError> {
        self.batches.lock().unwrap().push(calls.to_vec());
        (self.responder)(calls)
    }
}
