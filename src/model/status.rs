use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Lifecycle status of a leave application.
///
/// Transitions are owned by the approval state machine; nothing else may
/// move a record between statuses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    ApprovedBySupervisor,
    RejectedBySupervisor,
    ApprovedByHod,
    RejectedByHod,
    Recorded,
    Cancelled,
}

impl LeaveStatus {
    /// Terminal statuses are retained for history; no transition leaves them.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LeaveStatus::RejectedBySupervisor
                | LeaveStatus::RejectedByHod
                | LeaveStatus::Recorded
                | LeaveStatus::Cancelled
        )
    }
}
