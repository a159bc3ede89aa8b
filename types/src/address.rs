//! Account identity as seen by the ledger.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An account identity.
///
/// Authentication happens outside this crate; by the time an `AccountId`
/// reaches the ledger it is simply an opaque, comparable name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id from a raw string.
    ///
    /// # Panics
    /// Panics if the string is empty or contains whitespace. Use
    /// [`AccountId::parse`] for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(Self::is_well_formed(&s), "account id must be non-empty and contain no whitespace");
        Self(s)
    }

    /// Parse an account id, rejecting empty or whitespace-containing names.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        if Self::is_well_formed(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(TypesError::InvalidAccount(raw.to_string()))
        }
    }

    /// Return the raw account string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(s: &str) -> bool {
        !s.is_empty() && !s.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
