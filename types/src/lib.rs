//! Fundamental types for ballot.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the arbitrary-precision decimal and its 24-decimal fixed-point codec, function
//! selectors, vote amounts, vote records, proposal references, and participation
//! parameters.

pub mod address;
pub mod amount;
pub mod decimal;
pub mod error;
pub mod fixed;
pub mod params;
pub mod proposal;
pub mod record;
pub mod selector;

pub use address::{is_valid_address, parse_address};
pub use alloy_primitives::{Address, Bytes, Selector, B256, U256};
pub use amount::{VoteAmounts, VoteType, VoterLedger};
pub use decimal::Decimal;
pub use error::TypesError;
pub use fixed::{from_fixed, to_fixed, FIXED_DECIMALS};
pub use params::ParticipationParameters;
pub use proposal::{ProposalRef, ThresholdEntry};
pub use record::{VoteAction, VoteCastRecord};
pub use selector::{extract_selector, selector_from_calldata};
