//! Abstract chain access for ballot.
//!
//! Every backend (JSON-RPC, in-memory for testing) implements these traits.
//! The governance engine depends only on the traits, so each component takes
//! its collaborators as explicit parameters.

pub mod call;
pub mod error;
pub mod log;

pub use call::{CallOutcome, ContractCall};
pub use error::ChainError;
pub use log::{EventFilter, RawLog};

use alloy_primitives::Bytes;
use async_trait::async_trait;

/// Source of raw event logs.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch every log emitted under `event_name` that matches `filter`.
    ///
    /// Implementations may return logs of several schema versions for the same
    /// name; consumers must dispatch on each log's own signature topic.
    async fn fetch_events(
        &self,
        chain_id: u64,
        event_name: &str,
        filter: &EventFilter,
    ) -> Result<Vec<RawLog>, ChainError>;
}

/// Batched, read-only contract calls.
#[async_trait]
pub trait MulticallClient: Send + Sync {
    /// Execute `calls` in one round trip.
    ///
    /// Returns exactly one outcome per call, in request order. A reverted call
    /// is reported through [`CallOutcome::success`], never as an `Err`; `Err` means
    /// the whole batch could not be executed.
    async fn multicall(&self, calls: &[ContractCall]) -> Result<Vec<CallOutcome>, ChainError>;
}

/// Single read-only contract call (`eth_call`).
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError>;
}
