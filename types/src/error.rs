//! Errors raised while constructing core types from untrusted input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid account id: {0:?}")]
    InvalidAccount(String),

    #[error("invalid proposal id: {0:?}")]
    InvalidProposalId(String),
}
