//! Genesis allocation: the one and only mint.

use serde::{Deserialize, Serialize};
use vtk_types::{AccountId, Amount};

/// Who receives the supply at creation, and how much supply there is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// The deployer; receives the entire fixed supply.
    pub owner: AccountId,
    pub total_supply: Amount,
}

impl GenesisConfig {
    pub fn new(owner: AccountId, total_supply: Amount) -> Self {
        Self {
            owner,
            total_supply,
        }
    }
}
