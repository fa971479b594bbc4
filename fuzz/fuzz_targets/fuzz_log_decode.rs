#![no_main]

use alloy_primitives::{Address, B256};
use alloy_sol_types::SolEvent;
use ballot_chain::RawLog;
use ballot_governance::abi::{
    ProposalVoteRevoked, ProposalVoteRevokedV2, ProposalVoted, ProposalVotedV2,
};
use libfuzzer_sys::fuzz_target;

const SIGNATURES: [B256; 4] = [
    ProposalVoted::SIGNATURE_HASH,
    ProposalVoteRevoked::SIGNATURE_HASH,
    ProposalVotedV2::SIGNATURE_HASH,
    ProposalVoteRevokedV2::SIGNATURE_HASH,
];

// Decoding arbitrary logs never panics, and any record it yields is usable.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let (head, rest) = data.split_at(1);
    let topic_count = (head[0] % 5) as usize;
    let topic_bytes = (topic_count * 32).min(rest.len());
    let (topic_data, payload) = rest.split_at(topic_bytes);

    let mut topics: Vec<B256> = topic_data.chunks_exact(32).map(B256::from_slice).collect();
    // Steer most inputs onto a known signature so the ABI path is exercised.
    if head[0] < 0xf0 {
        if let Some(first) = topics.first_mut() {
            *first = SIGNATURES[head[0] as usize % SIGNATURES.len()];
        }
    }

    let log = RawLog::new(topics, payload.to_vec());
    if let Some(record) = ballot_governance::decode(&log) {
        assert_ne!(record.proposal_id, 0);
        assert_ne!(record.account, Address::ZERO);
    }
});
