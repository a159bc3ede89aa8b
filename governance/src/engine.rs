//! Core governance engine: proposal creation, vote casting, reweighing.

use crate::error::GovernanceError;
use crate::index::VoterIndex;
use crate::proposal::{ProposalInfo, ProposalStatus, VoteSide};
use crate::registry::{EvictionTier, ProposalRegistry};
use crate::tally::{self, TallyUpdate};
use std::collections::HashSet;
use vtk_ledger::BalanceChange;
use vtk_types::{AccountId, Amount, ProposalId, Timestamp, TokenEvent, TokenParams, PROPOSAL_SLOTS};

/// Owns the registry and the voter index, and keeps tallies equal to the
/// current balances of each side's voters.
///
/// Every mutating method either succeeds and appends its events to `events`
/// in order, or fails leaving state and `events` untouched.
#[derive(Debug)]
pub struct GovernanceEngine {
    registry: ProposalRegistry,
    index: VoterIndex,
    total_supply: Amount,
}

impl GovernanceEngine {
    pub fn new(params: &TokenParams) -> Self {
        Self {
            registry: ProposalRegistry::new(params.discard_after_secs),
            index: VoterIndex::new(),
            total_supply: params.total_supply,
        }
    }

    pub fn registry(&self) -> &ProposalRegistry {
        &self.registry
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Register a new proposal, evicting one if the registry is full.
    pub fn propose(
        &mut self,
        id: ProposalId,
        now: Timestamp,
        events: &mut Vec<TokenEvent>,
    ) -> Result<(), GovernanceError> {
        let placement = self.registry.insert(id, now)?;

        if let Some(eviction) = placement.evicted {
            let outgoing = eviction.proposal;
            self.index.forget(
                outgoing.id,
                outgoing.for_voters.iter().chain(outgoing.against_voters.iter()),
            );
            match eviction.tier {
                EvictionTier::Expired => {
                    tracing::info!(proposal = %outgoing.id, slot = placement.slot, "expired proposal discarded");
                    events.push(TokenEvent::ProposalDiscarded { id: outgoing.id });
                }
                EvictionTier::Decided => {
                    tracing::info!(
                        proposal = %outgoing.id,
                        status = %outgoing.status,
                        slot = placement.slot,
                        "decided proposal evicted"
                    );
                }
            }
        }

        tracing::info!(proposal = %id, slot = placement.slot, created_at = %now, "proposal created");
        events.push(TokenEvent::ProposalCreated { id });
        Ok(())
    }

    /// Record `voter`'s vote with its current balance as weight.
    pub fn cast_vote(
        &mut self,
        voter: &AccountId,
        id: ProposalId,
        side: VoteSide,
        weight: Amount,
        now: Timestamp,
        events: &mut Vec<TokenEvent>,
    ) -> Result<(), GovernanceError> {
        let slot = self.registry.slot_of(id).ok_or(GovernanceError::NotFound(id))?;
        let proposal = self.registry.slot(slot).ok_or(GovernanceError::NotFound(id))?;

        let status = self.registry.live_status(proposal, now);
        if !status.is_open() {
            return Err(GovernanceError::ProposalNotOpen { id, status });
        }
        if proposal.side_of(voter).is_some() {
            return Err(GovernanceError::AlreadyVoted {
                voter: voter.clone(),
                id,
            });
        }

        let (for_power, against_power) =
            tally::shift(id, proposal.for_power, proposal.against_power, side, true, weight)?;
        let update = TallyUpdate {
            slot,
            id,
            for_power,
            against_power,
            outcome: tally::decide(for_power, against_power, self.total_supply),
        };

        if let Some(proposal) = self.registry.slot_mut(slot) {
            proposal.add_voter(voter.clone(), side);
        }
        self.index.record(voter, id, side);
        tracing::debug!(proposal = %id, %voter, ?side, %weight, "vote cast");
        events.push(match side {
            VoteSide::For => TokenEvent::NewVoteFor {
                voter: voter.clone(),
                id,
            },
            VoteSide::Against => TokenEvent::NewVoteAgainst {
                voter: voter.clone(),
                id,
            },
        });
        self.apply(&update, events);
        Ok(())
    }

    /// Reweigh every open proposal the changed accounts voted on.
    ///
    /// Changes are processed in order; within one change, proposals in slot
    /// order. A proposal decided by an earlier step is not touched by later
    /// ones. An unchanged balance still reweighs by zero, announcing the
    /// tally and rerunning the threshold check.
    pub fn on_balance_changes(
        &mut self,
        changes: &[BalanceChange],
        now: Timestamp,
        events: &mut Vec<TokenEvent>,
    ) -> Result<(), GovernanceError> {
        let updates = self.plan_reweigh(changes, now)?;
        for update in &updates {
            self.apply(update, events);
        }
        Ok(())
    }

    /// Compute the tally updates `changes` would cause, without storing anything.
    pub fn plan_reweigh(
        &self,
        changes: &[BalanceChange],
        now: Timestamp,
    ) -> Result<Vec<TallyUpdate>, GovernanceError> {
        // Per slot: (for, against, still open) as staged so far.
        let mut staged: [Option<(Amount, Amount, bool)>; PROPOSAL_SLOTS] = [None; PROPOSAL_SLOTS];
        let mut updates = Vec::new();

        for change in changes {
            let (increase, by) = change.delta();
            let mut affected: Vec<(usize, ProposalId, VoteSide)> = self
                .index
                .votes_of(&change.account)
                .filter_map(|(id, side)| self.registry.slot_of(id).map(|slot| (slot, id, side)))
                .collect();
            affected.sort_by_key(|(slot, _, _)| *slot);

            for (slot, id, side) in affected {
                let Some(proposal) = self.registry.slot(slot) else {
                    continue;
                };
                let (for_power, against_power, open) = *staged[slot].get_or_insert_with(|| {
                    (
                        proposal.for_power,
                        proposal.against_power,
                        self.registry.live_status(proposal, now).is_open(),
                    )
                });
                if !open {
                    continue;
                }

                let (for_power, against_power) =
                    tally::shift(id, for_power, against_power, side, increase, by)?;
                let outcome = tally::decide(for_power, against_power, self.total_supply);
                staged[slot] = Some((for_power, against_power, outcome.is_none()));
                tracing::debug!(
                    proposal = %id,
                    account = %change.account,
                    old = %change.old,
                    new = %change.new,
                    "reweighing vote"
                );
                updates.push(TallyUpdate {
                    slot,
                    id,
                    for_power,
                    against_power,
                    outcome,
                });
            }
        }
        Ok(updates)
    }

    /// Store new tallies, announce them, and finalize on a strict majority.
    fn apply(&mut self, update: &TallyUpdate, events: &mut Vec<TokenEvent>) {
        let Some(proposal) = self.registry.slot_mut(update.slot) else {
            return;
        };
        proposal.for_power = update.for_power;
        proposal.against_power = update.against_power;
        events.push(TokenEvent::VotesRatioChanged {
            id: update.id,
            against: update.against_power,
            for_power: update.for_power,
        });

        match update.outcome {
            Some(ProposalStatus::Accepted) => {
                proposal.status = ProposalStatus::Accepted;
                tracing::info!(proposal = %update.id, for_power = %update.for_power, "proposal accepted");
                events.push(TokenEvent::ProposalAccepted { id: update.id });
            }
            Some(ProposalStatus::Rejected) => {
                proposal.status = ProposalStatus::Rejected;
                tracing::info!(proposal = %update.id, against_power = %update.against_power, "proposal rejected");
                events.push(TokenEvent::ProposalRejected { id: update.id });
            }
            _ => {}
        }
    }

    pub fn proposal_info(&self, id: ProposalId, now: Timestamp) -> Result<ProposalInfo, GovernanceError> {
        self.registry.info(id, now)
    }

    pub fn active_proposals(&self, now: Timestamp) -> Vec<ProposalId> {
        self.registry.active(now)
    }

    pub fn all_proposals(&self) -> Vec<ProposalId> {
        self.registry.all()
    }

    /// The for and against voter sets of a tracked proposal.
    pub fn voters(
        &self,
        id: ProposalId,
    ) -> Result<(&HashSet<AccountId>, &HashSet<AccountId>), GovernanceError> {
        self.registry
            .get(id)
            .map(|p| (&p.for_voters, &p.against_voters))
            .ok_or(GovernanceError::NotFound(id))
    }

    /// Number of accounts holding a vote in a tracked proposal.
    pub fn voter_count(&self) -> usize {
        self.index.voter_count()
    }

    /// Proposals `account` holds a vote in.
    pub fn votes_of(&self, account: &AccountId) -> Vec<(ProposalId, VoteSide)> {

        let mut votes: Vec<_> = self.index.votes_of(account).collect();
        votes.sort_by_key(|(id, _)| self.registry.slot_of(*id));
        votes
    }
}
