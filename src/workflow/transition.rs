//! Approval state machine.
//!
//! Pending -> approved/rejected by supervisor -> approved/rejected by HOD
//! -> recorded by HR, with an employee-initiated cancel while pending.
//! The table below is the single source of truth for legal transitions;
//! the ledger debit happens exactly once, on HOD approval.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::model::role::Role;
use crate::model::status::LeaveStatus;
use crate::model::user::{Actor, User};
use crate::workflow::error::WorkflowError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Approve,
    Reject,
    Cancel,
    Record,
}

/// Which human decision stage a status is waiting on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Supervisor,
    Hod,
}

impl Stage {
    pub fn of(status: LeaveStatus) -> Option<Stage> {
        match status {
            LeaveStatus::Pending => Some(Stage::Supervisor),
            LeaveStatus::ApprovedBySupervisor => Some(Stage::Hod),
            _ => None,
        }
    }
}

/// The transition table. Any (status, action) pair not listed here is an
/// `InvalidTransition` and leaves the record untouched.
pub fn next_status(from: LeaveStatus, action: Action) -> Result<LeaveStatus, WorkflowError> {
    match (from, action) {
        (LeaveStatus::Pending, Action::Approve) => Ok(LeaveStatus::ApprovedBySupervisor),
        (LeaveStatus::Pending, Action::Reject) => Ok(LeaveStatus::RejectedBySupervisor),
        (LeaveStatus::Pending, Action::Cancel) => Ok(LeaveStatus::Cancelled),
        (LeaveStatus::ApprovedBySupervisor, Action::Approve) => Ok(LeaveStatus::ApprovedByHod),
        (LeaveStatus::ApprovedBySupervisor, Action::Reject) => Ok(LeaveStatus::RejectedByHod),
        (LeaveStatus::ApprovedByHod, Action::Record) => Ok(LeaveStatus::Recorded),
        _ => Err(WorkflowError::InvalidTransition { from, action }),
    }
}

/// Whether the transition carries the single ledger debit.
pub fn debits_ledger(from: LeaveStatus, to: LeaveStatus) -> bool {
    from == LeaveStatus::ApprovedBySupervisor && to == LeaveStatus::ApprovedByHod
}

/// Checks that the actor is the resolved decider for this stage of the
/// employee's chain. The reporting links come from the employee record,
/// never from a claim asserted by the caller.
pub fn authorize_decider(stage: Stage, actor: &Actor, employee: &User) -> Result<(), WorkflowError> {
    let (link, required_role) = match stage {
        Stage::Supervisor => (&employee.supervisor_id, Role::Supervisor),
        Stage::Hod => (&employee.hod_id, Role::Hod),
    };
    if actor.role != required_role {
        return Err(WorkflowError::Unauthorized);
    }
    match link {
        Some(id) if *id == actor.id => Ok(()),
        _ => Err(WorkflowError::Unauthorized),
    }
}
