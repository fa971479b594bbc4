use ballot_chain::ChainError;
use ballot_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("numeric error: {0}")]
    Numeric(#[from] TypesError),

    #[error("abi decoding failed: {0}")]
    Abi(String),

    #[error("quorum computation overflowed")]
    Overflow,
}

impl From<alloy_sol_types::Error> for GovernanceError {
    fn from(e: alloy_sol_types::Error) -> Self {
        Self::Abi(e.to_string())
    }
}
