use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::category::LeaveCategory;
use crate::model::status::LeaveStatus;

/// One leave request and its approval trail.
///
/// Created in `Pending` by the workflow service; mutated only through
/// state-machine transitions; never deleted (terminal records are kept
/// for history). `number_of_days` is frozen at submission — there is no
/// amend transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveApplication {
    pub id: String,
    pub employee_id: String,
    /// Copied from the employee at submission so department reports are
    /// a plain filter over applications.
    pub department: String,
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Inclusive day count between start and end.
    pub number_of_days: u32,
    pub reason: String,
    pub proof_link: Option<String>,
    pub status: LeaveStatus,
    pub applied_at: DateTime<Utc>,
    pub supervisor_action_at: Option<DateTime<Utc>>,
    pub supervisor_feedback: Option<String>,
    pub hod_action_at: Option<DateTime<Utc>>,
    pub hod_feedback: Option<String>,
    pub captured_by: Option<String>,
    pub captured_at: Option<DateTime<Utc>>,
}
