//! Reverse index from voters to the proposals they hold a vote in.
//!
//! Lets a balance change reach exactly the affected proposals without
//! scanning every slot. Entries are non-owning: they are dropped when the
//! proposal leaves the registry.

use crate::proposal::VoteSide;
use std::collections::HashMap;
use vtk_types::{AccountId, ProposalId};

#[derive(Debug, Default)]
pub struct VoterIndex {
    /// voter → (proposal → side voted).
    votes: HashMap<AccountId, HashMap<ProposalId, VoteSide>>,
}

impl VoterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, voter: &AccountId, id: ProposalId, side: VoteSide) {
        self.votes.entry(voter.clone()).or_default().insert(id, side);
    }

    /// Proposals `voter` holds a vote in, with the side voted.
    pub fn votes_of(&self, voter: &AccountId) -> impl Iterator<Item = (ProposalId, VoteSide)> + '_ {
        self.votes
            .get(voter)
            .into_iter()
            .flat_map(|by_id| by_id.iter().map(|(id, side)| (*id, *side)))
    }

    /// Drop every entry pointing at `id` for the given voters.
    pub fn forget<'a>(&mut self, id: ProposalId, voters: impl IntoIterator<Item = &'a AccountId>) {
        for voter in voters {
            if let Some(by_id) = self.votes.get_mut(voter) {
                by_id.remove(&id);
                if by_id.is_empty() {
                    self.votes.remove(voter);
                }
            }
        }
    }

    /// Number of voters with at least one live entry.
    pub fn voter_count(&self) -> usize {
        self.votes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> AccountId {
        AccountId::new(name)
    }

    #[test]
    fn record_and_enumerate() {
        let mut index = VoterIndex::new();
        index.record(&voter("alice"), ProposalId::new(1), VoteSide::For);
        index.record(&voter("alice"), ProposalId::new(2), VoteSide::Against);

        let mut votes: Vec<_> = index.votes_of(&voter("alice")).collect();
        votes.sort_by_key(|(id, _)| *id);
        assert_eq!(
            votes,
            vec![
                (ProposalId::new(1), VoteSide::For),
                (ProposalId::new(2), VoteSide::Against)
            ]
        );
        assert_eq!(index.votes_of(&voter("bob")).count(), 0);
    }

    #[test]
    fn forget_removes_entries_and_empty_voters() {
        let mut index = VoterIndex::new();
        let alice = voter("alice");
        let bob = voter("bob");
        index.record(&alice, ProposalId::new(1), VoteSide::For);
        index.record(&alice, ProposalId::new(2), VoteSide::For);
        index.record(&bob, ProposalId::new(1), VoteSide::Against);

        index.forget(ProposalId::new(1), [&alice, &bob]);

        assert_eq!(index.votes_of(&alice).count(), 1);
        assert_eq!(index.votes_of(&bob).count(), 0);
        assert_eq!(index.voter_count(), 1);
    }
}
