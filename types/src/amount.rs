//! Vote types and per-type vote amounts.
//!
//! Amounts are raw on-chain voting weights (U256). Sums saturate instead of
//! wrapping; real locked-gold supplies are many orders of magnitude below 2^256.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

/// How a vote was cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Yes,
    No,
    Abstain,
}

impl VoteType {
    /// Map the legacy on-chain vote value (1=Abstain, 2=No, 3=Yes).
    pub fn from_legacy_value(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Abstain),
            2 => Some(Self::No),
            3 => Some(Self::Yes),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Abstain => "abstain",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Voting weight per vote type. All three entries are always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteAmounts {
    pub yes: U256,
    pub no: U256,
    pub abstain: U256,
}

impl VoteAmounts {
    pub const ZERO: Self = Self {
        yes: U256::ZERO,
        no: U256::ZERO,
        abstain: U256::ZERO,
    };

    pub fn new(yes: U256, no: U256, abstain: U256) -> Self {
        Self { yes, no, abstain }
    }

    /// Amounts with `weight` on a single vote type.
    pub fn single(vote: VoteType, weight: U256) -> Self {
        let mut amounts = Self::ZERO;
        amounts[vote] = weight;
        amounts
    }

    /// Sum over all vote types.
    pub fn total(&self) -> U256 {
        self.yes
            .saturating_add(self.no)
            .saturating_add(self.abstain)
    }

    /// True when every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.yes.is_zero() && self.no.is_zero() && self.abstain.is_zero()
    }

    /// Elementwise sum.
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            yes: self.yes.saturating_add(other.yes),
            no: self.no.saturating_add(other.no),
            abstain: self.abstain.saturating_add(other.abstain),
        }
    }
}

impl Index<VoteType> for VoteAmounts {
    type Output = U256;

    fn index(&self, vote: VoteType) -> &U256 {
        match vote {
            VoteType::Yes => &self.yes,
            VoteType::No => &self.no,
            VoteType::Abstain => &self.abstain,
        }
    }
}

impl IndexMut<VoteType> for VoteAmounts {
    fn index_mut(&mut self, vote: VoteType) -> &mut U256 {
        match vote {
            VoteType::Yes => &mut self.yes,
            VoteType::No => &mut self.no,
            VoteType::Abstain => &mut self.abstain,
        }
    }
}

/// Current vote per voter, ordered by address.
pub type VoterLedger = BTreeMap<Address, VoteAmounts>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_values_map_to_vote_types() {
        assert_eq!(VoteType::from_legacy_value(1), Some(VoteType::Abstain));
        assert_eq!(VoteType::from_legacy_value(2), Some(VoteType::No));
        assert_eq!(VoteType::from_legacy_value(3), Some(VoteType::Yes));
        assert_eq!(VoteType::from_legacy_value(0), None);
        assert_eq!(VoteType::from_legacy_value(4), None);
    }

    #[test]
    fn single_fills_one_bucket() {
        let amounts = VoteAmounts::single(VoteType::No, U256::from(7u64));
        assert_eq!(amounts.no, U256::from(7u64));
        assert!(amounts.yes.is_zero());
        assert!(amounts.abstain.is_zero());
        assert_eq!(amounts.total(), U256::from(7u64));
    }

    #[test]
    fn saturating_add_is_elementwise() {
        let a = VoteAmounts::new(U256::from(1u64), U256::from(2u64), U256::from(3u64));
        let b = VoteAmounts::new(U256::from(10u64), U256::ZERO, U256::MAX);
        let sum = a.saturating_add(b);
        assert_eq!(sum.yes, U256::from(11u64));
        assert_eq!(sum.no, U256::from(2u64));
        assert_eq!(sum.abstain, U256::MAX);
    }

    #[test]
    fn zero_detection() {
        assert!(VoteAmounts::default().is_zero());
        assert!(!VoteAmounts::single(VoteType::Abstain, U256::from(1u64)).is_zero());
    }
}
