use proptest::prelude::*;

use vtk_types::{AccountId, Amount, ProposalId, Timestamp};

proptest! {
    /// Once a proposal has outlived the deadline it stays expired as time moves on.
    #[test]
    fn expiry_is_monotonic_in_now(
        created in 0u64..1_000_000,
        deadline in 1u64..500_000,
        first in 0u64..1_000_000,
        later in 0u64..1_000_000,
    ) {
        let created_at = Timestamp::new(created);
        let now = Timestamp::new(created + first);
        let after = Timestamp::new(created + first + later);
        if created_at.is_older_than(deadline, now) {
            prop_assert!(created_at.is_older_than(deadline, after));
        }
    }

    /// A creation time ahead of the clock never reads as expired.
    #[test]
    fn future_creation_is_never_expired(
        now in 0u64..1_000_000,
        ahead in 1u64..1_000_000,
        deadline in 0u64..500_000,
    ) {
        let created_at = Timestamp::new(now + ahead);
        prop_assert_eq!(created_at.elapsed_since(Timestamp::new(now)), 0);
        prop_assert!(!created_at.is_older_than(deadline, Timestamp::new(now)));
    }

    /// is_older_than is a strict comparison on elapsed seconds.
    #[test]
    fn timestamp_is_older_than_is_strict(
        start in 0u64..500_000,
        duration in 1u64..500_000,
        offset in 0u64..1_000_000,
    ) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(start + offset);
        prop_assert_eq!(t.is_older_than(duration, now), offset > duration);
    }

    /// exceeds_half_of agrees with 2 * a > total for values that cannot overflow.
    #[test]
    fn amount_majority_matches_doubling(a in 0u128..u64::MAX as u128, total in 0u128..u64::MAX as u128) {
        prop_assert_eq!(Amount::new(a).exceeds_half_of(Amount::new(total)), a * 2 > total);
    }

    /// Amount: checked_sub returns None when b > a.
    #[test]
    fn amount_checked_sub_underflow(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = Amount::new(a).checked_sub(Amount::new(b));
        if b > a {
            prop_assert!(result.is_none());
        } else {
            prop_assert_eq!(result, Some(Amount::new(a - b)));
        }
    }

    /// Proposal ids parse from their decimal rendering.
    #[test]
    fn proposal_id_parses_display(raw in any::<u64>()) {
        let id = ProposalId::new(raw);
        prop_assert_eq!(id.to_string().parse::<ProposalId>().unwrap(), id);
    }

    /// Account ids without whitespace are always accepted.
    #[test]
    fn account_id_accepts_visible_names(name in "[a-zA-Z0-9_]{1,32}") {
        let id = AccountId::parse(&name).unwrap();
        prop_assert_eq!(id.as_str(), name.as_str());
    }
}
