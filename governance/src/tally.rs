//! Vote tally aggregation.
//!
//! The tally is a fold over vote records in the order given, keyed by account,
//! where each record *replaces* the account's standing vote. A re-vote
//! therefore supersedes the earlier one, and a revocation clears it. Records
//! are never reordered here; callers must pass them in chronological order.

use alloy_primitives::Address;
use ballot_types::{VoteAmounts, VoteCastRecord, VoterLedger};
use serde::{Deserialize, Serialize};

/// Current votes of a proposal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalTally {
    /// Voters with a nonzero standing vote.
    pub voters: VoterLedger,
    /// Elementwise sum over `voters`.
    pub totals: VoteAmounts,
}

impl ProposalTally {
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn votes_of(&self, account: &Address) -> Option<&VoteAmounts> {
        self.voters.get(account)
    }

    /// Voters by descending total weight, ties broken by address.
    pub fn sorted_by_weight(&self) -> Vec<(Address, VoteAmounts)> {
        let mut entries: Vec<_> = self.voters.iter().map(|(a, v)| (*a, *v)).collect();
        entries.sort_by(|(a_addr, a), (b_addr, b)| {
            b.total().cmp(&a.total()).then_with(|| a_addr.cmp(b_addr))
        });
        entries
    }
}

/// Last-write-wins fold: each record overwrites its account's entry.
fn standing_votes<'a, I>(records: I) -> VoterLedger
where
    I: IntoIterator<Item = &'a VoteCastRecord>,
{
    records
        .into_iter()
        .fold(VoterLedger::new(), |mut ledger, record| {
            ledger.insert(record.account, record.standing_amounts());
            ledger
        })
}

/// Build the tally from the complete, chronologically ordered record set.
pub fn aggregate<'a, I>(records: I) -> ProposalTally
where
    I: IntoIterator<Item = &'a VoteCastRecord>,
{
    let mut voters = standing_votes(records);
    voters.retain(|_, votes| !votes.is_zero());
    let totals = voters
        .values()
        .fold(VoteAmounts::ZERO, |acc, votes| acc.saturating_add(*votes));
    ProposalTally { voters, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use ballot_types::VoteAction;

    fn voter(seed: u8) -> Address {
        Address::repeat_byte(seed)
    }

    fn record(account: Address, yes: u64, no: u64, abstain: u64) -> VoteCastRecord {
        VoteCastRecord {
            proposal_id: 1,
            account,
            yes_votes: U256::from(yes),
            no_votes: U256::from(no),
            abstain_votes: U256::from(abstain),
            action: VoteAction::Cast,
        }
    }

    fn amounts(yes: u64, no: u64, abstain: u64) -> VoteAmounts {
        VoteAmounts::new(U256::from(yes), U256::from(no), U256::from(abstain))
    }

    #[test]
    fn empty_input_gives_empty_tally() {
        let tally = aggregate(&Vec::<VoteCastRecord>::new());
        assert_eq!(tally.voter_count(), 0);
        assert!(tally.totals.is_zero());
    }

    #[test]
    fn later_record_replaces_earlier() {
        let a = voter(1);
        let tally = aggregate(&[record(a, 100, 0, 0), record(a, 0, 40, 0)]);
        assert_eq!(tally.votes_of(&a), Some(&amounts(0, 40, 0)));
        assert_eq!(tally.totals, amounts(0, 40, 0));
    }

    #[test]
    fn votes_are_not_summed_across_records() {
        let a = voter(1);
        let tally = aggregate(&[record(a, 5, 0, 0), record(a, 5, 0, 0)]);
        assert_eq!(tally.totals.yes, U256::from(5u64));
    }

    #[test]
    fn zero_final_vote_drops_voter() {
        let a = voter(1);
        let b = voter(2);
        let tally = aggregate(&[record(a, 10, 0, 0), record(b, 3, 0, 0), record(a, 0, 0, 0)]);
        assert!(tally.votes_of(&a).is_none());
        assert_eq!(tally.voter_count(), 1);
        assert_eq!(tally.totals, amounts(3, 0, 0));
    }

    #[test]
    fn revocation_clears_standing_vote() {
        let a = voter(1);
        let mut revoke = record(a, 10, 0, 0);
        revoke.action = VoteAction::Revoke;
        let tally = aggregate(&[record(a, 10, 0, 0), revoke]);
        assert!(tally.voters.is_empty());
    }

    #[test]
    fn re_vote_after_revocation_counts() {
        let a = voter(1);
        let mut revoke = record(a, 10, 0, 0);
        revoke.action = VoteAction::Revoke;
        let tally = aggregate(&[record(a, 10, 0, 0), revoke, record(a, 0, 0, 7)]);
        assert_eq!(tally.votes_of(&a), Some(&amounts(0, 0, 7)));
    }

    #[test]
    fn totals_sum_every_voter() {
        let tally = aggregate(&[
            record(voter(1), 1, 2, 3),
            record(voter(2), 10, 20, 30),
            record(voter(3), 100, 0, 0),
        ]);
        assert_eq!(tally.totals, amounts(111, 22, 33));
    }

    #[test]
    fn sorted_by_weight_orders_descending() {
        let tally = aggregate(&[
            record(voter(1), 1, 0, 0),
            record(voter(2), 50, 0, 0),
            record(voter(3), 0, 50, 0),
        ]);
        let order: Vec<_> = tally.sorted_by_weight().into_iter().map(|(a, _)| a).collect();
        assert_eq!(order, vec![voter(2), voter(3), voter(1)]);
    }
}
