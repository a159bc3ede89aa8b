//! Caller-supplied proposal identifiers.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque proposal identifier chosen by the proposer.
///
/// The ledger attaches no meaning to the value; it is only compared for
/// equality against the ids currently held in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(u64);

impl ProposalId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProposalId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ProposalId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypesError::InvalidProposalId(s.to_string()))
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
