//! Governance client for ballot.
//!
//! Wires the chain backends, the governance engine, configuration and
//! logging together behind [`GovernanceClient`]. [`QueryState`] and
//! [`QueryHandle`] model in-flight queries for presentation layers.

pub mod config;
pub mod error;
pub mod governance;
pub mod logging;
pub mod query;

pub use config::ClientConfig;
pub use error::ClientError;
pub use governance::GovernanceClient;
pub use logging::{init_logging, LogFormat};
pub use query::{quorum_state, QueryHandle, QueryState};
