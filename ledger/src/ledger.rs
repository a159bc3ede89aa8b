//! In-memory balance and allowance tables.

use crate::change::{BalanceChange, TransferReceipt};
use crate::error::LedgerError;
use crate::genesis::GenesisConfig;
use std::collections::HashMap;
use vtk_types::{AccountId, Amount};

/// Account balances plus ERC-20 style allowances.
///
/// Accounts with a zero balance are not stored; [`BalanceLedger::balance_of`]
/// reports zero for them.
#[derive(Clone, Debug)]
pub struct BalanceLedger {
    balances: HashMap<AccountId, Amount>,
    /// (owner, spender) → amount the spender may still move on the owner's behalf.
    allowances: HashMap<(AccountId, AccountId), Amount>,
    total_supply: Amount,
}

impl BalanceLedger {
    /// Create a ledger where the genesis owner holds the whole supply.
    pub fn from_genesis(genesis: &GenesisConfig) -> Self {
        let mut balances = HashMap::new();
        if !genesis.total_supply.is_zero() {
            balances.insert(genesis.owner.clone(), genesis.total_supply);
        }
        tracing::info!(
            owner = %genesis.owner,
            total_supply = %genesis.total_supply,
            "ledger initialised"
        );
        Self {
            balances,
            allowances: HashMap::new(),
            total_supply: genesis.total_supply,
        }
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// All accounts with a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, Amount)> {
        self.balances.iter().map(|(account, balance)| (account, *balance))
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Set the amount `spender` may transfer out of `owner`'s balance.
    ///
    /// Overwrites any previous allowance; zero clears it.
    pub fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        let key = (owner.clone(), spender.clone());
        if amount.is_zero() {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount);
        }
        tracing::debug!(%owner, %spender, %amount, "allowance set");
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Either both balances change or neither does. A self-transfer is
    /// validated like any other and leaves the balance untouched; it reports
    /// one unchanged entry for the account so its votes are still reweighed.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let from_old = self.balance_of(from);
        let from_new = from_old
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: from_old.raw(),
            })?;

        let mut changes = Vec::with_capacity(2);
        if from == to {
            changes.push(BalanceChange {
                account: from.clone(),
                old: from_old,
                new: from_old,
            });
        } else {
            let to_old = self.balance_of(to);
            let to_new = to_old.checked_add(amount).ok_or(LedgerError::Overflow)?;
            self.set_balance(from, from_new);
            self.set_balance(to, to_new);
            changes.push(BalanceChange {
                account: from.clone(),
                old: from_old,
                new: from_new,
            });
            changes.push(BalanceChange {
                account: to.clone(),
                old: to_old,
                new: to_new,
            });
        }

        tracing::debug!(%from, %to, %amount, "transfer applied");
        Ok(TransferReceipt {
            from: from.clone(),
            to: to.clone(),
            amount,
            changes,
            allowance_spent: None,
        })
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// the spender's allowance.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<TransferReceipt, LedgerError> {
        let allowed = self.allowance(from, spender);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                needed: amount.raw(),
                available: allowed.raw(),
            })?;
        let mut receipt = self.transfer(from, to, amount)?;
        self.approve(from, spender, remaining);
        receipt.allowance_spent = Some((spender.clone(), allowed));
        Ok(receipt)
    }

    /// Undo a transfer previously applied by this ledger.
    ///
    /// Used when a later step of the same call fails, so the call as a whole
    /// has no effect.
    pub fn revert(&mut self, receipt: &TransferReceipt) {
        for change in receipt.changes.iter().rev() {
            self.set_balance(&change.account, change.old);
        }
        if let Some((spender, before)) = &receipt.allowance_spent {
            self.approve(&receipt.from, spender, *before);
        }
        tracing::debug!(from = %receipt.from, to = %receipt.to, amount = %receipt.amount, "transfer reverted");
    }

    fn set_balance(&mut self, account: &AccountId, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), balance);
        }
    }
}
