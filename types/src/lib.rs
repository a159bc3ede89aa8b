//! Fundamental types for the voting token.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identities, amounts, timestamps and the clock abstraction, proposal ids,
//! token parameters, and the domain events emitted by mutating calls.

pub mod address;
pub mod amount;
pub mod error;
pub mod event;
pub mod params;
pub mod proposal_id;
pub mod time;

pub use address::AccountId;
pub use amount::Amount;
pub use error::TypesError;
pub use event::TokenEvent;
pub use params::{TokenParams, DEFAULT_DISCARD_AFTER_SECS, DEFAULT_TOTAL_SUPPLY, PROPOSAL_SLOTS};
pub use proposal_id::ProposalId;
pub use time::{Clock, SystemClock, Timestamp};
