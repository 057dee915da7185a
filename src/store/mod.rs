//! Persistence collaborator boundary.
//!
//! The core treats storage as a document store with per-document
//! compare-and-set semantics: application updates are conditional on the
//! stored status still matching an expected value, and ledger writes are
//! conditional on the stored `used` counter. Those two conditional writes
//! are the serialization points for concurrent approvals.

pub mod memory;

use async_trait::async_trait;

use crate::model::category::LeaveCategory;
use crate::model::leave_application::LeaveApplication;
use crate::model::status::LeaveStatus;
use crate::model::user::{CategoryBalance, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Filter for application queries. All fields are AND-ed; `None` matches
/// everything. Results are always ordered by `applied_at` descending.
#[derive(Debug, Default, Clone)]
pub struct ApplicationFilter {
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub status: Option<LeaveStatus>,
}

#[async_trait]
pub trait WorkflowStore: Send + Sync + 'static {
    async fn get_user(&self, id: &str) -> Result<User, StoreError>;

    async fn put_user(&self, user: User) -> Result<(), StoreError>;

    async fn get_application(&self, id: &str) -> Result<LeaveApplication, StoreError>;

    async fn insert_application(&self, record: LeaveApplication) -> Result<(), StoreError>;

    /// Conditional write: replaces the stored record only if its status
    /// still equals `expected`. Returns `false` when the condition failed
    /// (another transition landed first); the record is left untouched.
    async fn update_application(
        &self,
        record: LeaveApplication,
        expected: LeaveStatus,
    ) -> Result<bool, StoreError>;

    async fn query_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<LeaveApplication>, StoreError>;

    async fn read_balance(
        &self,
        user_id: &str,
        category: LeaveCategory,
    ) -> Result<CategoryBalance, StoreError>;

    /// Compare-and-set on one (user, category) `used` counter. Returns
    /// `false` when `expected_used` no longer matches (a concurrent write
    /// got there first); the counter is left untouched.
    async fn update_ledger(
        &self,
        user_id: &str,
        category: LeaveCategory,
        expected_used: u32,
        new_used: u32,
    ) -> Result<bool, StoreError>;
}
