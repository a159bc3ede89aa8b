//! Balance-weighted governance for the voting token.
//!
//! Proposals are tracked in a fixed registry of 3 slots. Every account votes at
//! most once per proposal, for or against, and its voting power is always its
//! *current* balance: each transfer reweighs the tallies of every undecided
//! proposal the sender or receiver voted on.
//!
//! A proposal is accepted (or rejected) as soon as one side holds strictly more
//! than half of the total supply. An undecided proposal older than the discard
//! deadline reads as discarded; the stored status only changes when the slot
//! is reclaimed.
//!
//! When all slots are occupied, a new proposal evicts:
//! 1. the oldest proposal decided by vote, otherwise
//! 2. the oldest undecided proposal past its deadline, otherwise
//! 3. nothing, and the proposal is refused.

pub mod engine;
pub mod error;
pub mod index;
pub mod proposal;
pub mod registry;
pub mod tally;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use index::VoterIndex;
pub use proposal::{Proposal, ProposalInfo, ProposalStatus, VoteSide};
pub use registry::{Eviction, EvictionTier, Placement, ProposalRegistry};
pub use tally::TallyUpdate;
