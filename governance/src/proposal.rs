//! Proposal records and their status.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use vtk_types::{AccountId, Amount, ProposalId, Timestamp};

/// Lifecycle status of a proposal.
///
/// `Indefinite` is the only non-terminal status. `Accepted` and `Rejected`
/// are reached by vote; `Discarded` by time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    Discarded,
    Accepted,
    Rejected,
    Indefinite,
}

impl ProposalStatus {
    /// Whether the proposal was decided by a majority vote.
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Indefinite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discarded => "discarded",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Indefinite => "indefinite",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a proposal a vote supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteSide {
    For,
    Against,
}

/// A proposal held in a registry slot.
#[derive(Clone, Debug)]
pub struct Proposal {
    pub id: ProposalId,
    pub created_at: Timestamp,
    /// Stored status. Time-based expiry is not reflected here until the slot
    /// is reclaimed; see [`Proposal::live_status`].
    pub status: ProposalStatus,
    /// Sum of the current balances of `for_voters`.
    pub for_power: Amount,
    /// Sum of the current balances of `against_voters`.
    pub against_power: Amount,
    pub for_voters: HashSet<AccountId>,
    pub against_voters: HashSet<AccountId>,
}

impl Proposal {
    pub fn new(id: ProposalId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            status: ProposalStatus::Indefinite,
            for_power: Amount::ZERO,
            against_power: Amount::ZERO,
            for_voters: HashSet::new(),
            against_voters: HashSet::new(),
        }
    }

    /// Whether an undecided proposal has outlived the discard deadline.
    pub fn is_expired(&self, now: Timestamp, discard_after_secs: u64) -> bool {
        self.status.is_open() && self.created_at.is_older_than(discard_after_secs, now)
    }

    /// Status as of `now`, counting expiry that has not been stored yet.
    ///
    /// Pure: never changes the stored status.
    pub fn live_status(&self, now: Timestamp, discard_after_secs: u64) -> ProposalStatus {
        if self.is_expired(now, discard_after_secs) {
            ProposalStatus::Discarded
        } else {
            self.status
        }
    }

    /// The side `account` voted on, if it voted.
    pub fn side_of(&self, account: &AccountId) -> Option<VoteSide> {
        if self.for_voters.contains(account) {
            Some(VoteSide::For)
        } else if self.against_voters.contains(account) {
            Some(VoteSide::Against)
        } else {
            None
        }
    }

    pub fn power(&self, side: VoteSide) -> Amount {
        match side {
            VoteSide::For => self.for_power,
            VoteSide::Against => self.against_power,
        }
    }

    pub fn voters(&self, side: VoteSide) -> &HashSet<AccountId> {
        match side {
            VoteSide::For => &self.for_voters,
            VoteSide::Against => &self.against_voters,
        }
    }

    pub(crate) fn add_voter(&mut self, voter: AccountId, side: VoteSide) {
        match side {
            VoteSide::For => self.for_voters.insert(voter),
            VoteSide::Against => self.against_voters.insert(voter),
        };
    }

    pub fn info(&self, now: Timestamp, discard_after_secs: u64) -> ProposalInfo {
        ProposalInfo {
            id: self.id,
            status: self.live_status(now, discard_after_secs),
            for_power: self.for_power,
            against_power: self.against_power,
            created_at: self.created_at,
        }
    }
}

/// Read-only view of a proposal as of a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalInfo {
    pub id: ProposalId,
    /// Live status (see [`Proposal::live_status`]).
    pub status: ProposalStatus,
    pub for_power: Amount,
    pub against_power: Amount,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEADLINE: u64 = 259_200;

    fn proposal() -> Proposal {
        Proposal::new(ProposalId::new(123), Timestamp::new(1_000))
    }

    #[test]
    fn new_proposal_is_open_and_empty() {
        let p = proposal();
        assert_eq!(p.status, ProposalStatus::Indefinite);
        assert!(p.for_power.is_zero());
        assert!(p.against_power.is_zero());
        assert!(p.for_voters.is_empty());
    }

    #[test]
    fn live_status_flips_one_second_after_deadline() {
        let p = proposal();
        let at_deadline = Timestamp::new(1_000 + DEADLINE);
        let past_deadline = Timestamp::new(1_000 + DEADLINE + 1);

        assert_eq!(p.live_status(at_deadline, DEADLINE), ProposalStatus::Indefinite);
        assert_eq!(p.live_status(past_deadline, DEADLINE), ProposalStatus::Discarded);
        // Deriving never stores.
        assert_eq!(p.status, ProposalStatus::Indefinite);
    }

    #[test]
    fn decided_proposals_never_expire() {
        let mut p = proposal();
        p.status = ProposalStatus::Accepted;
        let far_future = Timestamp::new(1_000 + 10 * DEADLINE);
        assert!(!p.is_expired(far_future, DEADLINE));
        assert_eq!(p.live_status(far_future, DEADLINE), ProposalStatus::Accepted);
    }

    #[test]
    fn side_of_reports_recorded_vote() {
        let mut p = proposal();
        p.add_voter(AccountId::new("alice"), VoteSide::For);
        p.add_voter(AccountId::new("bob"), VoteSide::Against);

        assert_eq!(p.side_of(&AccountId::new("alice")), Some(VoteSide::For));
        assert_eq!(p.side_of(&AccountId::new("bob")), Some(VoteSide::Against));
        assert_eq!(p.side_of(&AccountId::new("carol")), None);
    }
}
