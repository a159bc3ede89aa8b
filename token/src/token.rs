//! The `VotingToken` facade: the caller boundary for every operation.

use std::collections::HashSet;

use vtk_governance::{GovernanceEngine, ProposalInfo, VoteSide};
use vtk_ledger::{BalanceLedger, TransferReceipt};
use vtk_types::{AccountId, Amount, Clock, ProposalId, SystemClock, TokenEvent};

use crate::config::TokenConfig;
use crate::error::TokenError;
use crate::event_bus::EventBus;

/// A fixed-supply token whose balances double as live voting power.
///
/// `caller` arguments are identities already authenticated by the host.
pub struct VotingToken<C: Clock = SystemClock> {
    name: String,
    symbol: String,
    decimals: u8,
    owner: AccountId,
    ledger: BalanceLedger,
    governance: GovernanceEngine,
    bus: EventBus,
    clock: C,
}

impl<C: Clock> VotingToken<C> {
    /// Create the token and mint the whole supply to the configured owner.
    pub fn new(config: &TokenConfig, clock: C) -> Result<Self, TokenError> {
        config.validate()?;
        let genesis = config.genesis()?;
        let token = Self {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            decimals: config.decimals,
            owner: genesis.owner.clone(),
            ledger: BalanceLedger::from_genesis(&genesis),
            governance: GovernanceEngine::new(&config.params()),
            bus: EventBus::new(),
            clock,
        };
        tracing::info!(
            name = %token.name,
            symbol = %token.symbol,
            owner = %token.owner,
            total_supply = %token.total_supply(),
            "voting token created"
        );
        Ok(token)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Register a listener for every event of every successful call.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    // ── Metadata and balances ──────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    pub fn governance(&self) -> &GovernanceEngine {
        &self.governance
    }

    // ── Ledger operations ──────────────────────────────────────────────

    /// Move `amount` from `caller` to `to`, then reweigh every open proposal
    /// either party voted on.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        let receipt = self
            .ledger
            .transfer(caller, to, amount)
            .map_err(|e| rejected("transfer", e))?;
        self.settle_transfer(receipt)
    }

    /// Let `spender` move up to `amount` out of `caller`'s balance.
    pub fn approve(
        &mut self,
        caller: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.ledger.approve(caller, spender, amount);
        Ok(self.publish(vec![TokenEvent::Approval {
            owner: caller.clone(),
            spender: spender.clone(),
            amount,
        }]))
    }

    /// Move `amount` from `from` to `to` using `caller`'s allowance.
    pub fn transfer_from(
        &mut self,
        caller: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        let receipt = self
            .ledger
            .transfer_from(caller, from, to, amount)
            .map_err(|e| rejected("transfer_from", e))?;
        self.settle_transfer(receipt)
    }

    /// Reweigh after an applied transfer; undo the transfer if that fails.
    fn settle_transfer(&mut self, receipt: TransferReceipt) -> Result<Vec<TokenEvent>, TokenError> {
        let now = self.clock.now();
        let mut events = vec![TokenEvent::Transfer {
            from: receipt.from.clone(),
            to: receipt.to.clone(),
            amount: receipt.amount,
        }];
        if let Err(e) = self
            .governance
            .on_balance_changes(&receipt.changes, now, &mut events)
        {
            self.ledger.revert(&receipt);
            tracing::warn!(from = %receipt.from, to = %receipt.to, error = %e, "reweigh failed, transfer reverted");
            return Err(e.into());
        }
        Ok(self.publish(events))
    }

    // ── Governance operations ──────────────────────────────────────────

    /// Track a new proposal, evicting a decided or expired one if all slots
    /// are taken.
    pub fn propose(&mut self, id: ProposalId) -> Result<Vec<TokenEvent>, TokenError> {
        let now = self.clock.now();
        let mut events = Vec::new();
        self.governance
            .propose(id, now, &mut events)
            .map_err(|e| rejected("propose", e))?;
        Ok(self.publish(events))
    }

    /// Vote for `id` with `caller`'s current balance.
    pub fn accept_proposal(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.vote(caller, id, VoteSide::For)
    }

    /// Vote against `id` with `caller`'s current balance.
    pub fn reject_proposal(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        self.vote(caller, id, VoteSide::Against)
    }

    fn vote(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        side: VoteSide,
    ) -> Result<Vec<TokenEvent>, TokenError> {
        let now = self.clock.now();
        let weight = self.ledger.balance_of(caller);
        let mut events = Vec::new();
        self.governance
            .cast_vote(caller, id, side, weight, now, &mut events)
            .map_err(|e| rejected("vote", e))?;
        Ok(self.publish(events))
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn proposal_info(&self, id: ProposalId) -> Result<ProposalInfo, TokenError> {
        Ok(self.governance.proposal_info(id, self.clock.now())?)
    }

    /// Ids of tracked proposals that are still open, in slot order.
    pub fn active_proposals(&self) -> Vec<ProposalId> {
        self.governance.active_proposals(self.clock.now())
    }

    /// Ids of every tracked proposal, open or not, in slot order.
    pub fn all_proposals(&self) -> Vec<ProposalId> {
        self.governance.all_proposals()
    }

    /// For and against voter sets of a tracked proposal.
    pub fn voters(
        &self,
        id: ProposalId,
    ) -> Result<(&HashSet<AccountId>, &HashSet<AccountId>), TokenError> {
        Ok(self.governance.voters(id)?)
    }

    fn publish(&self, events: Vec<TokenEvent>) -> Vec<TokenEvent> {
        for event in &events {
            self.bus.emit(event);
        }
        events
    }
}

fn rejected(op: &'static str, err: impl Into<TokenError>) -> TokenError {
    let err = err.into();
    tracing::debug!(op, error = %err, "call rejected");
    err
}

impl<C: Clock> std::fmt::Debug for VotingToken<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VotingToken")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("owner", &self.owner)
            .field("total_supply", &self.ledger.total_supply())
            .field("proposals", &self.governance.all_proposals())
            .field("voters", &self.governance.voter_count())
            .field("listeners", &self.bus.listener_count())
            .finish()
    }
}
