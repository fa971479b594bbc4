use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolEvent};
use ballot_chain::{CallOutcome, RawLog};
use ballot_governance::abi::{
    getConstitutionCall, getParticipationParametersCall, getProposalTransactionCall,
    ProposalVotedV2,
};
use ballot_governance::{
    aggregate, decode_all, read_participation_parameters, QuorumCalculator, ThresholdResolver,
};
use ballot_nullables::{NullContractReader, NullMulticall};
use ballot_types::{to_fixed, Decimal, ProposalRef};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn fixed(s: &str) -> U256 {
    to_fixed(&dec(s)).unwrap()
}

/// Every transaction targets the same contract; every lookup answers `fraction`.
fn uniform_multicall(fraction: &'static str) -> NullMulticall {
    NullMulticall::with_responder(move |calls| {
        let outcomes = if calls[0].selector() == Some(getProposalTransactionCall::SELECTOR) {
            calls
                .iter()
                .map(|_| {
                    CallOutcome::ok(getProposalTransactionCall::abi_encode_returns(&(
                        U256::ZERO,
                        Address::repeat_byte(0x42),
                        Bytes::from(vec![0xde, 0xad, 0xbe, 0xef, 0x01]),
                    )))
                })
                .collect()
        } else {
            calls
                .iter()
                .map(|_| CallOutcome::ok(getConstitutionCall::abi_encode_returns(&(fixed(fraction),))))
                .collect()
        };
        Ok(outcomes)
    })
}

#[tokio::test]
async fn resolution_takes_two_round_trips_regardless_of_size() {
    for n in [1u64, 50] {
        let multicall = uniform_multicall("0.7");
        let resolver = ThresholdResolver::new(Address::repeat_byte(0x60));
        let thresholds = resolver
            .resolve_thresholds(&multicall, &ProposalRef::new(5, n, U256::ZERO))
            .await
            .unwrap();
        assert_eq!(thresholds.len() as u64, n);
        assert!(thresholds.iter().all(|t| *t == dec("0.7")));
        assert_eq!(multicall.call_count(), 2);
        let batches = multicall.batches();
        assert_eq!(batches[0].len() as u64, n);
        assert_eq!(batches[1].len() as u64, n + 1);
    }
}

#[tokio::test]
async fn logs_to_quorum() {
    let governance = Address::repeat_byte(0x60);
    let logs: Vec<RawLog> = (1u8..=3)
        .map(|i| {
            let data = ProposalVotedV2 {
                proposalId: U256::from(11u64),
                account: Address::repeat_byte(i),
                yesVotes: U256::from(u64::from(i) * 100),
                noVotes: U256::ZERO,
                abstainVotes: U256::from(1u64),
            }
            .encode_log_data();
            RawLog::new(data.topics().to_vec(), data.data.clone())
        })
        .collect();

    let tally = aggregate(&decode_all(&logs));
    assert_eq!(tally.voter_count(), 3);
    assert_eq!(tally.totals.yes, U256::from(600u64));
    assert_eq!(tally.totals.abstain, U256::from(3u64));

    let reader = NullContractReader::new();
    reader.respond(
        getParticipationParametersCall::SELECTOR,
        getParticipationParametersCall::abi_encode_returns(&(
            fixed("0.2"),
            fixed("0.05"),
            fixed("0.2"),
            fixed("0.5"),
        )),
    );
    let params = read_participation_parameters(&reader, governance).await.unwrap();

    let proposal = ProposalRef::new(11, 2, U256::from(1_000_000u64));
    let thresholds = ThresholdResolver::new(governance)
        .resolve_thresholds(&uniform_multicall("0.6"), &proposal)
        .await
        .unwrap();

    // 1_000_000 * 0.2 * 0.5 * 0.6
    let quorum = QuorumCalculator::default()
        .compute_quorum(&proposal, &params, &thresholds)
        .unwrap();
    assert_eq!(quorum, U256::from(60_000u64));
    assert!(tally.totals.total() < quorum);
}
