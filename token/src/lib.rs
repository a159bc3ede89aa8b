//! The voting token: a fixed-supply ledger whose balances are live voting power.
//!
//! [`VotingToken`] is the single entry point. Each call runs to completion
//! before the next one starts (`&mut self`), either applying all of its
//! effects and returning the events it produced, or failing with no effect.
//! Hosts that accept calls concurrently must serialise them first, e.g. by
//! holding the token behind a `Mutex`.

pub mod config;
pub mod error;
pub mod event_bus;
pub mod token;

pub use config::TokenConfig;
pub use error::TokenError;
pub use event_bus::EventBus;
pub use token::VotingToken;

pub use vtk_governance::{ProposalInfo, ProposalStatus, VoteSide};
pub use vtk_types::{AccountId, Amount, Clock, ProposalId, SystemClock, Timestamp, TokenEvent};
