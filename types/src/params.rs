//! Participation parameters: the governance-tunable inputs of the quorum.
//!
//! The governance contract stores four fixed-point values:
//! - `baseline`: expected participation, as a fraction of network weight.
//! - `baseline_floor`: lower bound the baseline never drops below.
//! - `baseline_update_factor`: weight of the latest participation in the
//!   baseline's moving average.
//! - `baseline_quorum_factor`: share of the baseline that constitutes quorum.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{from_fixed, Decimal, TypesError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationParameters {
    pub baseline: Decimal,
    pub baseline_floor: Decimal,
    pub baseline_update_factor: Decimal,
    pub baseline_quorum_factor: Decimal,
}

impl ParticipationParameters {
    /// Decode the four raw fixed-point values, in contract order.
    pub fn from_raw(raw: [U256; 4]) -> Self {
        let [baseline, floor, update_factor, quorum_factor] = raw;
        Self {
            baseline: from_fixed(baseline),
            baseline_floor: from_fixed(floor),
            baseline_update_factor: from_fixed(update_factor),
            baseline_quorum_factor: from_fixed(quorum_factor),
        }
    }

    /// Fraction of network weight that constitutes quorum before the
    /// per-transaction threshold is applied.
    pub fn quorum_fraction(&self) -> Result<Decimal, TypesError> {
        self.baseline
            .checked_mul(&self.baseline_quorum_factor)
            .ok_or(TypesError::Overflow)
    }

    /// Baseline after a proposal with the given participation fraction:
    /// `max(floor, (1 - f) * baseline + f * participation)`.
    pub fn next_baseline(&self, participation: &Decimal) -> Result<Decimal, TypesError> {
        let keep = Decimal::ONE
            .checked_sub(&self.baseline_update_factor)
            .ok_or_else(|| {
                TypesError::InvalidDecimal(format!(
                    "baseline update factor {} exceeds 1",
                    self.baseline_update_factor
                ))
            })?;
        let carried = keep
            .checked_mul(&self.baseline)
            .ok_or(TypesError::Overflow)?;
        let fresh = self
            .baseline_update_factor
            .checked_mul(participation)
            .ok_or(TypesError::Overflow)?;
        let updated = carried.checked_add(&fresh).ok_or(TypesError::Overflow)?;
        Ok(updated.max(self.baseline_floor))
    }
}
