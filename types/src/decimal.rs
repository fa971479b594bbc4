//! Arbitrary-precision, non-negative decimal numbers.
//!
//! A `Decimal` is a 512-bit unsigned mantissa paired with a base-10 scale:
//! `value = mantissa / 10^scale`. Values are kept normalized (no trailing
//! zeros in the mantissa while `scale > 0`), so the derived equality and hash
//! are value equality. Arithmetic is exact; anything that does not fit in the
//! mantissa is reported as overflow instead of being rounded.

use alloy_primitives::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// Largest exponent accepted by the parser. `10^155` already exceeds a 512-bit mantissa.
const MAX_EXPONENT: i64 = 160;

/// A non-negative decimal with exact arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: U512,
    scale: u32,
}

fn ten() -> U512 {
    U512::from(10u64)
}

/// `10^exp`, or `None` when it does not fit in 512 bits.
pub(crate) fn pow10(exp: u32) -> Option<U512> {
    let mut acc = U512::from(1u64);
    for _ in 0..exp {
        acc = acc.checked_mul(ten())?;
    }
    Some(acc)
}

impl Decimal {
    pub const ZERO: Self = Self {
        mantissa: U512::ZERO,
        scale: 0,
    };

    pub const ONE: Self = Self {
        mantissa: U512::from_limbs([1, 0, 0, 0, 0, 0, 0, 0]),
        scale: 0,
    };

    /// One half, the simple-majority fraction.
    pub const HALF: Self = Self {
        mantissa: U512::from_limbs([5, 0, 0, 0, 0, 0, 0, 0]),
        scale: 1,
    };

    /// Build `mantissa / 10^scale`.
    pub fn new(mantissa: U512, scale: u32) -> Self {
        Self { mantissa, scale }.normalized()
    }

    /// An integral decimal.
    pub fn from_integer(value: U256) -> Self {
        Self::new(U512::from(value), 0)
    }

    pub fn mantissa(&self) -> U512 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    fn normalized(mut self) -> Self {
        if self.mantissa.is_zero() {
            return Self::ZERO;
        }
        while self.scale > 0 && (self.mantissa % ten()).is_zero() {
            self.mantissa /= ten();
            self.scale -= 1;
        }
        self
    }

    /// Mantissa re-expressed at a larger scale.
    fn mantissa_at(&self, scale: u32) -> Option<U512> {
        debug_assert!(scale >= self.scale);
        self.mantissa.checked_mul(pow10(scale - self.scale)?)
    }

    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let mantissa = self.mantissa.checked_mul(other.mantissa)?;
        let scale = self.scale.checked_add(other.scale)?;
        Some(Self::new(mantissa, scale))
    }

    /// Multiply by an integer (e.g. a raw token amount).
    pub fn checked_mul_integer(&self, value: U256) -> Option<Self> {
        self.checked_mul(&Self::from_integer(value))
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let scale = self.scale.max(other.scale);
        let lhs = self.mantissa_at(scale)?;
        let rhs = other.mantissa_at(scale)?;
        Some(Self::new(lhs.checked_add(rhs)?, scale))
    }

    /// Subtraction; `None` if the result would be negative or overflow while aligning.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let scale = self.scale.max(other.scale);
        let lhs = self.mantissa_at(scale)?;
        let rhs = other.mantissa_at(scale)?;
        Some(Self::new(lhs.checked_sub(rhs)?, scale))
    }

    /// Integer part, truncating toward zero.
    pub fn trunc(&self) -> U512 {
        match pow10(self.scale) {
            Some(divisor) => self.mantissa / divisor,
            // 10^scale exceeds any mantissa.
            None => U512::ZERO,
        }
    }

    /// Nearest integer, halves rounded away from zero.
    pub fn round_half_up(&self) -> U512 {
        let Some(divisor) = pow10(self.scale) else {
            return U512::ZERO;
        };
        let quotient = self.mantissa / divisor;
        let remainder = self.mantissa % divisor;
        // remainder * 2 >= divisor, written to avoid overflowing the doubled remainder
        if remainder >= divisor - remainder {
            quotient + U512::from(1u64)
        } else {
            quotient
        }
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(U512::from(value), 0)
    }
}

impl From<U256> for Decimal {
    fn from(value: U256) -> Self {
        Self::from_integer(value)
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        // Only the operand with the smaller scale is rescaled, so if that overflows
        // it is necessarily the larger value.
        match (self.mantissa_at(scale), other.mantissa_at(scale)) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            (None, _) => Ordering::Greater,
            (_, None) => Ordering::Less,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Decimal {
    type Err = TypesError;

    /// Parses plain (`"0.06"`, `"12"`, `".5"`) and exponent (`"1e-24"`, `"2.5E3"`)
    /// notation. Negative values are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidDecimal(s.to_string());
        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let (number, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exp: i64 = unsigned[pos + 1..].parse().map_err(|_| invalid())?;
                (&unsigned[..pos], exp)
            }
            None => (unsigned, 0),
        };
        if exponent.abs() > MAX_EXPONENT {
            return Err(invalid());
        }

        let (int_part, frac_part) = match number.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (number, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let mut mantissa = U512::ZERO;
        for c in int_part.chars().chain(frac_part.chars()) {
            let digit = c.to_digit(10).ok_or_else(invalid)?;
            mantissa = mantissa
                .checked_mul(ten())
                .and_then(|m| m.checked_add(U512::from(digit)))
                .ok_or(TypesError::Overflow)?;
        }

        let scale = frac_part.len() as i64 - exponent;
        if scale >= 0 {
            Ok(Self::new(mantissa, scale as u32))
        } else {
            let factor = pow10((-scale) as u32).ok_or(TypesError::Overflow)?;
            let mantissa = mantissa.checked_mul(factor).ok_or(TypesError::Overflow)?;
            Ok(Self::new(mantissa, 0))
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{int_part}.{frac_part}")
        } else {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
