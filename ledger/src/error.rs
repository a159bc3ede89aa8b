use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("transfer amount must be non-zero")]
    InvalidAmount,

    #[error("arithmetic overflow in balance computation")]
    Overflow,
}
