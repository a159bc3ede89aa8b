//! Fixed-supply balance ledger.
//!
//! The whole supply is minted once to the genesis owner; afterwards balances
//! only move between accounts, so the sum of all balances always equals the
//! total supply. The ledger knows nothing about voting: every successful
//! transfer hands back the per-account [`BalanceChange`]s so the caller can
//! notify whoever tracks balance-weighted state.

pub mod change;
pub mod error;
pub mod genesis;
pub mod ledger;

pub use change::{BalanceChange, TransferReceipt};
pub use error::LedgerError;
pub use genesis::GenesisConfig;
pub use ledger::BalanceLedger;
