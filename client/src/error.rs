use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("governance error: {0}")]
    Governance(#[from] ballot_governance::GovernanceError),

    #[error("chain error: {0}")]
    Chain(#[from] ballot_chain::ChainError),

    #[error("config error: {0}")]
    Config(String),
}
