use crate::model::status::LeaveStatus;
use crate::workflow::transition::Action;

/// Failure kinds surfaced by the workflow service.
///
/// Validation and authorization errors are raised before any mutation.
/// `PersistenceFailure` means the write phase could not be committed; the
/// caller may retry the whole operation, which is safe because every
/// transition is conditional on its "from" status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("end date must not be before start date")]
    InvalidDateRange,
    #[error("insufficient balance: {available} day(s) available, {requested} requested")]
    InsufficientBalance { available: i64, requested: u32 },
    #[error("actor is not authorized to act on this application")]
    Unauthorized,
    #[error("no {action} transition from status {from}")]
    InvalidTransition { from: LeaveStatus, action: Action },
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("persistence failure")]
    PersistenceFailure,
}
