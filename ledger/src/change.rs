//! Balance-change notifications produced by transfers.

use vtk_types::{AccountId, Amount};

/// The balance of one account before and after a transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceChange {
    pub account: AccountId,
    pub old: Amount,
    pub new: Amount,
}

impl BalanceChange {
    /// Whether the balance went up (`true`) or down (`false`), and by how much.
    pub fn delta(&self) -> (bool, Amount) {
        match self.new.checked_sub(self.old) {
            Some(gain) => (true, gain),
            None => (false, self.old.checked_sub(self.new).unwrap_or(Amount::ZERO)),
        }
    }
}

/// Everything needed to report on, or undo, one applied transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Amount,
    /// Sender first, then receiver. A self-transfer has a single entry with
    /// `old == new`.
    pub changes: Vec<BalanceChange>,
    /// Allowance consumed by a delegated transfer: `(spender, amount_before)`.
    pub allowance_spent: Option<(AccountId, Amount)>,
}
