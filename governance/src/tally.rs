//! Tally arithmetic and the majority threshold.

use crate::error::GovernanceError;
use crate::proposal::{ProposalStatus, VoteSide};
use vtk_types::{Amount, ProposalId};

/// New tallies for one proposal, computed before anything is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyUpdate {
    pub slot: usize,
    pub id: ProposalId,
    pub for_power: Amount,
    pub against_power: Amount,
    /// Terminal status reached by this update, if any.
    pub outcome: Option<ProposalStatus>,
}

/// Apply a signed change to one side's power.
pub(crate) fn shift(
    id: ProposalId,
    for_power: Amount,
    against_power: Amount,
    side: VoteSide,
    increase: bool,
    by: Amount,
) -> Result<(Amount, Amount), GovernanceError> {
    let apply = |power: Amount| {
        let shifted = if increase {
            power.checked_add(by)
        } else {
            power.checked_sub(by)
        };
        shifted.ok_or(GovernanceError::TallyOverflow(id))
    };
    match side {
        VoteSide::For => Ok((apply(for_power)?, against_power)),
        VoteSide::Against => Ok((for_power, apply(against_power)?)),
    }
}

/// Status reached by the given tallies, checking "for" before "against".
pub(crate) fn decide(for_power: Amount, against_power: Amount, total_supply: Amount) -> Option<ProposalStatus> {
    if for_power.exceeds_half_of(total_supply) {
        Some(ProposalStatus::Accepted)
    } else if against_power.exceeds_half_of(total_supply) {
        Some(ProposalStatus::Rejected)
    } else {
        None
    }
}
