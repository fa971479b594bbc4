//! Participation parameter reader.

use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use ballot_chain::{ContractCall, ContractReader};
use ballot_types::ParticipationParameters;
use tracing::debug;

use crate::abi::getParticipationParametersCall;
use crate::GovernanceError;

/// Read `getParticipationParameters()` from the governance contract and decode
/// the four fixed-point values.
pub async fn read_participation_parameters(
    reader: &dyn ContractReader,
    governance: Address,
) -> Result<ParticipationParameters, GovernanceError> {
    let call = ContractCall::new(governance, getParticipationParametersCall {}.abi_encode());
    let data = reader.call(&call).await?;
    let ret = getParticipationParametersCall::abi_decode_returns(&data, false)?;
    let params = ParticipationParameters::from_raw([
        ret.baseline,
        ret.baselineFloor,
        ret.baselineUpdateFactor,
        ret.baselineQuorumFactor,
    ]);
    debug!(
        baseline = %params.baseline,
        quorum_factor = %params.baseline_quorum_factor,
        "read participation parameters"
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Bytes, U256};
    use ballot_chain::ChainError;
    use ballot_nullables::NullContractReader;
    use ballot_types::Decimal;

    fn encoded(raw: [u128; 4]) -> Bytes {
        getParticipationParametersCall::abi_encode_returns(&(
            U256::from(raw[0]),
            U256::from(raw[1]),
            U256::from(raw[2]),
            U256::from(raw[3]),
        ))
        .into()
    }

    #[tokio::test]
    async fn decodes_parameters_in_contract_order() {
        let reader = NullContractReader::new();
        reader.respond(
            getParticipationParametersCall::SELECTOR,
            encoded([
                60_000_000_000_000_000_000_000,
                50_000_000_000_000_000_000_000,
                200_000_000_000_000_000_000_000,
                500_000_000_000_000_000_000_000,
            ]),
        );
        let params = read_participation_parameters(&reader, Address::repeat_byte(0xaa))
            .await
            .unwrap();
        assert_eq!(params.baseline, "0.06".parse::<Decimal>().unwrap());
        assert_eq!(params.baseline_floor, "0.05".parse::<Decimal>().unwrap());
        assert_eq!(params.baseline_update_factor, "0.2".parse::<Decimal>().unwrap());
        assert_eq!(params.baseline_quorum_factor, "0.5".parse::<Decimal>().unwrap());
        assert_eq!(reader.calls()[0].target, Address::repeat_byte(0xaa));
    }

    #[tokio::test]
    async fn rpc_failure_is_surfaced() {
        let reader = NullContractReader::new();
        reader.fail_with(ChainError::Timeout);
        let err = read_participation_parameters(&reader, Address::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Chain(ChainError::Timeout)));
    }

    #[tokio::test]
    async fn garbage_return_data_is_an_abi_error() {
        let reader = NullContractReader::new();
        reader.respond(getParticipationParametersCall::SELECTOR, Bytes::from(vec![1u8, 2, 3]));
        let err = read_participation_parameters(&reader, Address::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Abi(_)));
    }
}
