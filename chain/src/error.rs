use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("chain id mismatch: expected {expected}, got {got}")]
    ChainMismatch { expected: u64, got: u64 },

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    #[error("multicall returned {got} results for {expected} calls")]
    LengthMismatch { expected: usize, got: usize },

    #[error("{0}")]
    Other(String),
}
