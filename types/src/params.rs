//! Token parameters fixed at initialisation.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};

/// Number of proposal slots in the registry.
pub const PROPOSAL_SLOTS: usize = 3;

/// Seconds after creation past which an undecided proposal counts as discarded (3 days).
pub const DEFAULT_DISCARD_AFTER_SECS: u64 = 3 * 24 * 60 * 60;

/// Supply minted to the owner at initialisation.
pub const DEFAULT_TOTAL_SUPPLY: u128 = 100_000_000;

/// Parameters that never change after the token is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    /// Fixed total supply; the owner receives all of it once.
    pub total_supply: Amount,

    /// An undecided proposal is discarded once strictly more than this many
    /// seconds have passed since its creation.
    pub discard_after_secs: u64,
}

impl TokenParams {
    pub fn new(total_supply: Amount) -> Self {
        Self {
            total_supply,
            discard_after_secs: DEFAULT_DISCARD_AFTER_SECS,
        }
    }
}

impl Default for TokenParams {
    fn default() -> Self {
        Self::new(Amount::new(DEFAULT_TOTAL_SUPPLY))
    }
}
