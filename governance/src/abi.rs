//! Solidity bindings for the governance contract.
//!
//! Two generations of vote events exist on chain: the original single-value
//! events and the V2 split-vote events. Both are live in historical logs.

use alloy_primitives::B256;
use alloy_sol_types::{sol, SolEvent};

sol! {
    /// Original vote event. `value` is 1=Abstain, 2=No, 3=Yes.
    #[derive(Debug)]
    event ProposalVoted(
        uint256 indexed proposalId,
        address indexed account,
        uint256 value,
        uint256 weight
    );

    #[derive(Debug)]
    event ProposalVoteRevoked(
        uint256 indexed proposalId,
        address indexed account,
        uint256 value,
        uint256 weight
    );

    /// Split vote event.
    #[derive(Debug)]
    event ProposalVotedV2(
        uint256 indexed proposalId,
        address indexed account,
        uint256 yesVotes,
        uint256 noVotes,
        uint256 abstainVotes
    );

    #[derive(Debug)]
    event ProposalVoteRevokedV2(
        uint256 indexed proposalId,
        address indexed account,
        uint256 yesVotes,
        uint256 noVotes,
        uint256 abstainVotes
    );

    function getProposalTransaction(uint256 proposalId, uint256 index)
        external
        view
        returns (uint256 value, address destination, bytes data);

    function getConstitution(address destination, bytes4 functionId)
        external
        view
        returns (uint256 threshold);

    function getParticipationParameters()
        external
        view
        returns (
            uint256 baseline,
            uint256 baselineFloor,
            uint256 baselineUpdateFactor,
            uint256 baselineQuorumFactor
        );
}

/// Signature topics a log source should match for `event_name`.
///
/// The un-versioned names also match their V2 successor, since a proposal's
/// votes can span both generations.
pub fn event_topics(event_name: &str) -> Option<Vec<B256>> {
    let topics = match event_name {
        "ProposalVoted" => vec![ProposalVoted::SIGNATURE_HASH, ProposalVotedV2::SIGNATURE_HASH],
        "ProposalVoteRevoked" => vec![
            ProposalVoteRevoked::SIGNATURE_HASH,
            ProposalVoteRevokedV2::SIGNATURE_HASH,
        ],
        "ProposalVotedV2" => vec![ProposalVotedV2::SIGNATURE_HASH],
        "ProposalVoteRevokedV2" => vec![ProposalVoteRevokedV2::SIGNATURE_HASH],
        _ => return None,
    };
    Some(topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn signature_hashes_match_canonical_signatures() {
        assert_eq!(
            ProposalVoted::SIGNATURE_HASH,
            keccak256("ProposalVoted(uint256,address,uint256,uint256)")
        );
        assert_eq!(
            ProposalVotedV2::SIGNATURE_HASH,
            keccak256("ProposalVotedV2(uint256,address,uint256,uint256,uint256)")
        );
    }

    #[test]
    fn base_names_cover_both_generations() {
        let topics = event_topics("ProposalVoted").unwrap();
        assert_eq!(topics.len(), 2);
        assert!(topics.contains(&ProposalVotedV2::SIGNATURE_HASH));
        assert!(event_topics("SomethingElse").is_none());
    }
}
