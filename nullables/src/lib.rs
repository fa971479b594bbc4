//! Nullable chain access for deterministic testing.
//!
//! Every chain collaborator (log source, multicall, contract reads) is
//! abstracted behind a trait in `ballot-chain`. This crate provides
//! test-friendly implementations that:
//! - Return scripted values
//! - Record every request for assertions
//! - Never touch the network
//!
//! Usage: swap the JSON-RPC implementations for nullables in tests.

pub mod contract;
pub mod logs;
pub mod multicall;

pub use contract::NullContractReader;
pub use logs::NullLogSource;
pub use multicall::NullMulticall;
