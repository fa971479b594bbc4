//! Error type shared by the numeric and encoding helpers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("numeric overflow")]
    Overflow,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
