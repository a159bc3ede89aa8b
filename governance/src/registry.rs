//! The proposal registry: a fixed set of slots with two-tier eviction.

use crate::error::GovernanceError;
use crate::proposal::{Proposal, ProposalInfo, ProposalStatus};
use vtk_types::{ProposalId, Timestamp, PROPOSAL_SLOTS};

/// Why an occupied slot was chosen for reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvictionTier {
    /// Accepted or rejected by vote.
    Decided,
    /// Undecided and past the discard deadline.
    Expired,
}

/// A proposal removed from the registry to make room for a new one.
#[derive(Debug)]
pub struct Eviction {
    pub tier: EvictionTier,
    /// The outgoing record. For [`EvictionTier::Expired`] its status has been
    /// moved to `Discarded`.
    pub proposal: Proposal,
}

/// Where a new proposal was placed, and what it displaced.
#[derive(Debug)]
pub struct Placement {
    pub slot: usize,
    pub evicted: Option<Eviction>,
}

/// Up to [`PROPOSAL_SLOTS`] concurrently tracked proposals.
///
/// Slots are replaced in place; the registry never grows.
#[derive(Debug)]
pub struct ProposalRegistry {
    slots: [Option<Proposal>; PROPOSAL_SLOTS],
    discard_after_secs: u64,
}

impl ProposalRegistry {
    pub fn new(discard_after_secs: u64) -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            discard_after_secs,
        }
    }

    pub fn discard_after_secs(&self) -> u64 {
        self.discard_after_secs
    }

    /// Slot index holding `id`, if any.
    pub fn slot_of(&self, id: ProposalId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|p| p.id == id))
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.slot_of(id).and_then(|i| self.slots[i].as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: ProposalId) -> Option<&mut Proposal> {
        self.slot_of(id).and_then(move |i| self.slots[i].as_mut())
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&Proposal> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Proposal> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn live_status(&self, proposal: &Proposal, now: Timestamp) -> ProposalStatus {
        proposal.live_status(now, self.discard_after_secs)
    }

    pub fn info(&self, id: ProposalId, now: Timestamp) -> Result<ProposalInfo, GovernanceError> {
        self.get(id)
            .map(|p| p.info(now, self.discard_after_secs))
            .ok_or(GovernanceError::NotFound(id))
    }

    /// Ids of occupied slots whose live status is still `Indefinite`, in slot order.
    pub fn active(&self, now: Timestamp) -> Vec<ProposalId> {
        self.iter()
            .filter(|p| self.live_status(p, now).is_open())
            .map(|p| p.id)
            .collect()
    }

    /// Ids of all occupied slots regardless of status, in slot order.
    pub fn all(&self) -> Vec<ProposalId> {
        self.iter().map(|p| p.id).collect()
    }

    /// Pick the slot a new proposal would displace when the registry is full.
    ///
    /// Decided proposals go first, then expired ones; the oldest by
    /// `created_at` within a tier, lowest slot on ties. `None` when nothing
    /// is evictable.
    pub fn select_eviction(&self, now: Timestamp) -> Option<(usize, EvictionTier)> {
        let oldest = |tier: EvictionTier| {
            self.slots
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.as_ref().map(|p| (i, p)))
                .filter(|(_, p)| match tier {
                    EvictionTier::Decided => p.status.is_decided(),
                    EvictionTier::Expired => p.is_expired(now, self.discard_after_secs),
                })
                .min_by_key(|(i, p)| (p.created_at, *i))
                .map(|(i, _)| (i, tier))
        };
        oldest(EvictionTier::Decided).or_else(|| oldest(EvictionTier::Expired))
    }

    /// Place a new, undecided proposal created at `now`.
    ///
    /// Fails with `DuplicateProposal` if any occupied slot already holds `id`
    /// (whatever its status), and with `RegistryFull` if every slot is taken
    /// and none is evictable. Nothing changes on failure.
    pub fn insert(&mut self, id: ProposalId, now: Timestamp) -> Result<Placement, GovernanceError> {
        if self.slot_of(id).is_some() {
            return Err(GovernanceError::DuplicateProposal(id));
        }

        if let Some(slot) = self.slots.iter().position(Option::is_none) {
            self.slots[slot] = Some(Proposal::new(id, now));
            return Ok(Placement {
                slot,
                evicted: None,
            });
        }

        let (slot, tier) = self
            .select_eviction(now)
            .ok_or(GovernanceError::RegistryFull)?;
        let mut outgoing = self.slots[slot]
            .replace(Proposal::new(id, now))
            .ok_or(GovernanceError::RegistryFull)?;
        if tier == EvictionTier::Expired {
            outgoing.status = ProposalStatus::Discarded;
        }
        Ok(Placement {
            slot,
            evicted: Some(Eviction {
                tier,
                proposal: outgoing,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEADLINE: u64 = 259_200;

    fn id(raw: u64) -> ProposalId {
        ProposalId::new(raw)
    }

    fn t(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn full_registry() -> ProposalRegistry {
        let mut r = ProposalRegistry::new(DEADLINE);
        for i in 0..3 {
            r.insert(id(i), t(i)).unwrap();
        }
        r
    }

    #[test]
    fn fills_empty_slots_in_order() {
        let r = full_registry();
        assert_eq!(r.all(), vec![id(0), id(1), id(2)]);
        assert_eq!(r.active(t(10)), vec![id(0), id(1), id(2)]);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn duplicate_id_is_refused_regardless_of_status() {
        let mut r = full_registry();
        r.get_mut(id(1)).unwrap().status = ProposalStatus::Accepted;
        assert_eq!(
            r.insert(id(1), t(100)).unwrap_err(),
            GovernanceError::DuplicateProposal(id(1))
        );
        assert_eq!(r.all(), vec![id(0), id(1), id(2)]);
    }

    #[test]
    fn full_registry_without_candidates_is_refused() {
        let mut r = full_registry();
        assert_eq!(r.select_eviction(t(DEADLINE)), None);
        assert_eq!(r.insert(id(99), t(DEADLINE)).unwrap_err(), GovernanceError::RegistryFull);
        assert_eq!(r.all(), vec![id(0), id(1), id(2)]);
    }

    #[test]
    fn expired_proposal_is_replaced_in_place_and_discarded() {
        let mut r = full_registry();
        let now = t(DEADLINE + 1);
        let placement = r.insert(id(3), now).unwrap();

        assert_eq!(placement.slot, 0);
        let evicted = placement.evicted.unwrap();
        assert_eq!(evicted.tier, EvictionTier::Expired);
        assert_eq!(evicted.proposal.id, id(0));
        assert_eq!(evicted.proposal.status, ProposalStatus::Discarded);
        assert_eq!(r.all(), vec![id(3), id(1), id(2)]);
    }

    #[test]
    fn decided_proposals_are_evicted_before_older_expired_ones() {
        let mut r = full_registry();
        r.get_mut(id(0)).unwrap().status = ProposalStatus::Accepted;
        r.get_mut(id(2)).unwrap().status = ProposalStatus::Rejected;
        let now = t(DEADLINE + 10);
        assert!(r.get(id(1)).unwrap().is_expired(now, DEADLINE));

        let first = r.insert(id(3), now).unwrap().evicted.unwrap();
        assert_eq!((first.proposal.id, first.tier), (id(0), EvictionTier::Decided));
        assert_eq!(first.proposal.status, ProposalStatus::Accepted);

        let second = r.insert(id(4), now).unwrap().evicted.unwrap();
        assert_eq!((second.proposal.id, second.tier), (id(2), EvictionTier::Decided));

        let mut all = r.all();
        all.sort();
        assert_eq!(all, vec![id(1), id(3), id(4)]);
    }

    #[test]
    fn oldest_expired_is_chosen_among_several() {
        let mut r = ProposalRegistry::new(DEADLINE);
        r.insert(id(10), t(50)).unwrap();
        r.insert(id(11), t(20)).unwrap();
        r.insert(id(12), t(30)).unwrap();

        let now = t(50 + DEADLINE + 1);
        assert_eq!(r.select_eviction(now), Some((1, EvictionTier::Expired)));
    }

    #[test]
    fn ties_on_creation_time_pick_lowest_slot() {
        let mut r = ProposalRegistry::new(DEADLINE);
        for i in 0..3 {
            r.insert(id(i), t(0)).unwrap();
        }
        assert_eq!(r.select_eviction(t(DEADLINE + 1)), Some((0, EvictionTier::Expired)));
    }

    #[test]
    fn active_excludes_decided_and_expired() {
        let mut r = full_registry();
        r.get_mut(id(2)).unwrap().status = ProposalStatus::Rejected;
        // id 0 created at t=0 expires first.
        assert_eq!(r.active(t(DEADLINE + 1)), vec![id(1)]);
        assert_eq!(r.active(t(DEADLINE + 2)), Vec::<ProposalId>::new());
        assert_eq!(r.all().len(), 3);
    }

    #[test]
    fn info_reports_live_status_without_storing_it() {
        let r = full_registry();
        let info = r.info(id(0), t(DEADLINE + 1)).unwrap();
        assert_eq!(info.status, ProposalStatus::Discarded);
        assert_eq!(r.get(id(0)).unwrap().status, ProposalStatus::Indefinite);
        assert_eq!(r.info(id(42), t(0)).unwrap_err(), GovernanceError::NotFound(id(42)));
    }
}
