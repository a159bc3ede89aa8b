use thiserror::Error;
use vtk_governance::GovernanceError;
use vtk_ledger::LedgerError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("configuration error: {0}")]
    Config(String),
}
