//! Contract call requests and their outcomes.

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// A read-only call: ABI-encoded call-data sent to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCall {
    pub target: Address,
    pub calldata: Bytes,
}

impl ContractCall {
    pub fn new(target: Address, calldata: impl Into<Bytes>) -> Self {
        Self {
            target,
            calldata: calldata.into(),
        }
    }

    /// First 4 bytes of the call-data, if present.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.calldata.get(..4).and_then(|s| s.try_into().ok())
    }
}

/// Result of one call inside a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOutcome {
    pub success: bool,
    pub return_data: Bytes,
}

impl CallOutcome {
    pub fn ok(return_data: impl Into<Bytes>) -> Self {
        Self {
            success: true,
            return_data: return_data.into(),
        }
    }

    pub fn reverted() -> Self {
        Self {
            success: false,
            return_data: Bytes::new(),
        }
    }

    /// Return data of a successful call.
    pub fn data(&self) -> Option<&Bytes> {
        self.success.then_some(&self.return_data)
    }
}
