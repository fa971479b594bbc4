//! Governance vote tally and quorum engine.
//!
//! Pipeline:
//! - raw logs → [`decoder`] → [`VoteCastRecord`](ballot_types::VoteCastRecord)s →
//!   [`tally`] → per-voter ledger and totals
//! - proposal transactions → [`thresholds`] (two multicalls) → per-transaction
//!   threshold fractions
//! - thresholds + [`params`] + network weight → [`quorum`] → absolute quorum
//!
//! Collaborators (log source, multicall, contract reader) are always passed in
//! explicitly; nothing here holds global state.

pub mod abi;
pub mod decoder;
pub mod error;
pub mod params;
pub mod quorum;
pub mod tally;
pub mod thresholds;

pub use decoder::{decode, decode_all, DecodedVoteEvent, LogDecodeError};
pub use error::GovernanceError;
pub use params::read_participation_parameters;
pub use quorum::{compute_quorum, QuorumCalculator, DEFAULT_THRESHOLD};
pub use tally::{aggregate, ProposalTally};
pub use thresholds::ThresholdResolver;
