//! Absolute quorum computation.
//!
//! `quorum = round(network_weight × baseline × baseline_quorum_factor × max_threshold)`
//!
//! Every product is exact; the only rounding is the final half-up step to an
//! integer vote weight.

use alloy_primitives::ruint::UintTryFrom;
use alloy_primitives::U256;
use ballot_types::{Decimal, ParticipationParameters, ProposalRef};
use tracing::debug;

use crate::GovernanceError;

/// Threshold assumed for a proposal with no transactions: a simple majority.
pub const DEFAULT_THRESHOLD: Decimal = Decimal::HALF;

#[derive(Clone, Debug)]
pub struct QuorumCalculator {
    default_threshold: Decimal,
}

impl QuorumCalculator {
    pub fn new(default_threshold: Decimal) -> Self {
        Self { default_threshold }
    }

    /// Highest threshold, or the default when there are none.
    pub fn max_threshold(&self, thresholds: &[Decimal]) -> Decimal {
        thresholds
            .iter()
            .copied()
            .max()
            .unwrap_or(self.default_threshold)
    }

    /// Vote weight the proposal must reach.
    pub fn compute_quorum(
        &self,
        proposal: &ProposalRef,
        params: &ParticipationParameters,
        thresholds: &[Decimal],
    ) -> Result<U256, GovernanceError> {
        let quorum_fraction = params.quorum_fraction()?;
        let quorum_votes = quorum_fraction
            .checked_mul_integer(proposal.network_weight)
            .ok_or(GovernanceError::Overflow)?;
        let max_threshold = self.max_threshold(thresholds);
        let required = quorum_votes
            .checked_mul(&max_threshold)
            .ok_or(GovernanceError::Overflow)?;
        let quorum =
            U256::uint_try_from(required.round_half_up()).map_err(|_| GovernanceError::Overflow)?;

        debug!(
            proposal = proposal.id,
            %quorum_fraction,
            %max_threshold,
            %quorum,
            "computed quorum"
        );
        Ok(quorum)
    }
}

impl Default for QuorumCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

/// [`QuorumCalculator::compute_quorum`] with the default threshold.
pub fn compute_quorum(
    proposal: &ProposalRef,
    params: &ParticipationParameters,
    thresholds: &[Decimal],
) -> Result<U256, GovernanceError> {
    QuorumCalculator::default().compute_quorum(proposal, params, thresholds)
}
