use crate::proposal::ProposalStatus;
use thiserror::Error;
use vtk_types::{AccountId, ProposalId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("The proposal is already in the queue.")]
    DuplicateProposal(ProposalId),

    #[error("The limit of active proposals has been reached")]
    RegistryFull,

    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    #[error("proposal {id} is not open for voting (status: {status})")]
    ProposalNotOpen {
        id: ProposalId,
        status: ProposalStatus,
    },

    #[error("account {voter} has already voted on proposal {id}")]
    AlreadyVoted { voter: AccountId, id: ProposalId },

    #[error("arithmetic overflow in tally of proposal {0}")]
    TallyOverflow(ProposalId),
}
