use proptest::prelude::*;

use vtk_ledger::{BalanceLedger, GenesisConfig};
use vtk_types::{AccountId, Amount};

const ACCOUNTS: [&str; 4] = ["owner", "alice", "bob", "carol"];

fn ledger(supply: u128) -> BalanceLedger {
    BalanceLedger::from_genesis(&GenesisConfig::new(AccountId::new("owner"), Amount::new(supply)))
}

proptest! {
    /// Sum of balances equals total supply after any sequence of transfers,
    /// whether individual transfers succeed or fail.
    #[test]
    fn supply_is_conserved(
        supply in 1u128..1_000_000_000,
        ops in prop::collection::vec((0usize..4, 0usize..4, 0u128..2_000_000_000), 0..64),
    ) {
        let mut l = ledger(supply);
        for (from, to, amount) in ops {
            let _ = l.transfer(
                &AccountId::new(ACCOUNTS[from]),
                &AccountId::new(ACCOUNTS[to]),
                Amount::new(amount),
            );
            let total: u128 = l.holders().map(|(_, b)| b.raw()).sum();
            prop_assert_eq!(total, supply);
        }
    }

    /// Reported changes are exactly the before/after balances of the two parties.
    #[test]
    fn receipt_matches_observed_balances(
        amount in 1u128..1_000,
        supply in 1_000u128..10_000,
    ) {
        let mut l = ledger(supply);
        let owner = AccountId::new("owner");
        let alice = AccountId::new("alice");
        let receipt = l.transfer(&owner, &alice, Amount::new(amount)).unwrap();
        prop_assert_eq!(receipt.changes[0].new, l.balance_of(&owner));
        prop_assert_eq!(receipt.changes[1].new, l.balance_of(&alice));
        prop_assert_eq!(receipt.changes[0].old.raw() - receipt.changes[0].new.raw(), amount);
    }

    /// A reverted transfer leaves every balance as it was.
    #[test]
    fn revert_is_exact(
        amount in 1u128..1_000,
        supply in 1_000u128..10_000,
    ) {
        let mut l = ledger(supply);
        let owner = AccountId::new("owner");
        let bob = AccountId::new("bob");
        let receipt = l.transfer(&owner, &bob, Amount::new(amount)).unwrap();
        l.revert(&receipt);
        prop_assert_eq!(l.balance_of(&owner), Amount::new(supply));
        prop_assert_eq!(l.balance_of(&bob), Amount::ZERO);
    }
}
