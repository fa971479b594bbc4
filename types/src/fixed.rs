//! 24-decimal fixed-point codec.
//!
//! On-chain governance fractions are integers scaled by `10^24`. These helpers
//! move between that encoding and [`Decimal`] without going through floats.

use alloy_primitives::ruint::UintTryFrom;
use alloy_primitives::{U256, U512};

use crate::decimal::pow10;
use crate::{Decimal, TypesError};

/// Number of fractional digits in the on-chain fixed-point encoding.
pub const FIXED_DECIMALS: u32 = 24;

/// Scale `value` by `10^24`, truncating any digits beyond the 24th.
pub fn to_fixed(value: &Decimal) -> Result<U256, TypesError> {
    let scaled = if value.scale() <= FIXED_DECIMALS {
        let factor = pow10(FIXED_DECIMALS - value.scale()).ok_or(TypesError::Overflow)?;
        value
            .mantissa()
            .checked_mul(factor)
            .ok_or(TypesError::Overflow)?
    } else {
        match pow10(value.scale() - FIXED_DECIMALS) {
            Some(divisor) => value.mantissa() / divisor,
            None => U512::ZERO,
        }
    };
    U256::uint_try_from(scaled).map_err(|_| TypesError::Overflow)
}

/// Interpret a raw fixed-point integer as a decimal. Always exact.
pub fn from_fixed(raw: U256) -> Decimal {
    Decimal::new(U512::from(raw), FIXED_DECIMALS)
}
