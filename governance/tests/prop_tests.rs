use alloy_primitives::{Address, U256};
use proptest::prelude::*;

use ballot_governance::aggregate;
use ballot_types::{VoteAction, VoteAmounts, VoteCastRecord};

fn record_strategy() -> impl Strategy<Value = VoteCastRecord> {
    (0u8..8, 0u64..1_000, 0u64..1_000, 0u64..1_000, prop::bool::weighted(0.2)).prop_map(
        |(voter, yes, no, abstain, revoke)| VoteCastRecord {
            proposal_id: 1,
            account: Address::repeat_byte(voter),
            yes_votes: U256::from(yes),
            no_votes: U256::from(no),
            abstain_votes: U256::from(abstain),
            action: if revoke { VoteAction::Revoke } else { VoteAction::Cast },
        },
    )
}

proptest! {
    /// Totals are exactly the elementwise sum of the ledger.
    #[test]
    fn totals_equal_ledger_sum(records in prop::collection::vec(record_strategy(), 0..64)) {
        let tally = aggregate(&records);
        let sum = tally
            .voters
            .values()
            .fold(VoteAmounts::ZERO, |acc, v| acc.saturating_add(*v));
        prop_assert_eq!(tally.totals, sum);
    }

    /// No voter with an all-zero vote is kept.
    #[test]
    fn no_zero_voters(records in prop::collection::vec(record_strategy(), 0..64)) {
        let tally = aggregate(&records);
        prop_assert!(tally.voters.values().all(|v| !v.is_zero()));
    }

    /// Each voter's entry is their last record.
    #[test]
    fn last_record_wins(records in prop::collection::vec(record_strategy(), 1..64)) {
        let tally = aggregate(&records);
        for record in &records {
            let last = records.iter().rev().find(|r| r.account == record.account).unwrap();
            let standing = last.standing_amounts();
            match tally.votes_of(&record.account) {
                Some(votes) => prop_assert_eq!(*votes, standing),
                None => prop_assert!(standing.is_zero()),
            }
        }
    }

    /// Aggregation does not depend on records of other voters.
    #[test]
    fn voters_are_independent(records in prop::collection::vec(record_strategy(), 0..64), pivot in 0u8..8) {
        let only_pivot: Vec<_> = records
            .iter()
            .filter(|r| r.account == Address::repeat_byte(pivot))
            .cloned()
            .collect();
        let full = aggregate(&records);
        let single = aggregate(&only_pivot);
        prop_assert_eq!(
            full.votes_of(&Address::repeat_byte(pivot)),
            single.votes_of(&Address::repeat_byte(pivot))
        );
    }
}
