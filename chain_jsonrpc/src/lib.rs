//! JSON-RPC backend for ballot chain access.
//!
//! Implements the `ballot-chain` traits against any Ethereum-compatible node:
//! - [`JsonRpcClient`]: raw `eth_call`, `eth_getLogs`, `eth_chainId`
//! - [`Multicall3`]: batched reads through the Multicall3 `aggregate3` entry point
//! - [`JsonRpcLogSource`]: event logs by name, filtered by proposal id

pub mod logs;
pub mod multicall;
pub mod rpc;

pub use logs::JsonRpcLogSource;
pub use multicall::{Multicall3, MULTICALL3_ADDRESS};
pub use rpc::JsonRpcClient;
