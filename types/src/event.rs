//! Domain events emitted synchronously by mutating calls.
//!
//! Events of one call are delivered in the order they were produced. A call
//! that fails emits nothing.

use crate::{AccountId, Amount, ProposalId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Balance moved between two accounts.
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    /// An allowance was set.
    Approval {
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    },
    ProposalCreated {
        id: ProposalId,
    },
    /// A time-expired proposal was evicted to make room for a new one.
    ProposalDiscarded {
        id: ProposalId,
    },
    ProposalAccepted {
        id: ProposalId,
    },
    ProposalRejected {
        id: ProposalId,
    },
    NewVoteFor {
        voter: AccountId,
        id: ProposalId,
    },
    NewVoteAgainst {
        voter: AccountId,
        id: ProposalId,
    },
    /// Tallies of a proposal changed; emitted after every vote or reweigh.
    VotesRatioChanged {
        id: ProposalId,
        against: Amount,
        #[serde(rename = "for")]
        for_power: Amount,
    },
}

impl TokenEvent {
    /// The proposal this event concerns, if any.
    pub fn proposal(&self) -> Option<ProposalId> {
        match self {
            Self::Transfer { .. } | Self::Approval { .. } => None,
            Self::ProposalCreated { id }
            | Self::ProposalDiscarded { id }
            | Self::ProposalAccepted { id }
            | Self::ProposalRejected { id }
            | Self::NewVoteFor { id, .. }
            | Self::NewVoteAgainst { id, .. }
            | Self::VotesRatioChanged { id, .. } => Some(*id),
        }
    }

    /// Short event name, e.g. `"ProposalCreated"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::ProposalCreated { .. } => "ProposalCreated",
            Self::ProposalDiscarded { .. } => "ProposalDiscarded",
            Self::ProposalAccepted { .. } => "ProposalAccepted",
            Self::ProposalRejected { .. } => "ProposalRejected",
            Self::NewVoteFor { .. } => "NewVoteFor",
            Self::NewVoteAgainst { .. } => "NewVoteAgainst",
            Self::VotesRatioChanged { .. } => "VotesRatioChanged",
        }
    }
}

impl fmt::Display for TokenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::Transfer { from, to, amount } => write!(f, "{name}({from}, {to}, {amount})"),
            Self::Approval {
                owner,
                spender,
                amount,
            } => write!(f, "{name}({owner}, {spender}, {amount})"),
            Self::ProposalCreated { id }
            | Self::ProposalDiscarded { id }
            | Self::ProposalAccepted { id }
            | Self::ProposalRejected { id } => write!(f, "{name}({id})"),
            Self::NewVoteFor { voter, id } | Self::NewVoteAgainst { voter, id } => {
                write!(f, "{name}({voter}, {id})")
            }
            Self::VotesRatioChanged {
                id,
                against,
                for_power,
            } => write!(f, "{name}({id}, {against}, {for_power})"),
        }
    }
}
