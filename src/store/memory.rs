//! In-memory reference store.
//!
//! Backs the server wiring and the test suite. The conditional-write
//! checks run under the write lock, which gives them the same atomicity a
//! database conditional UPDATE would provide.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::category::LeaveCategory;
use crate::model::leave_application::LeaveApplication;
use crate::model::status::LeaveStatus;
use crate::model::user::{CategoryBalance, User};
use crate::store::{ApplicationFilter, StoreError, WorkflowStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    applications: RwLock<HashMap<String, LeaveApplication>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &ApplicationFilter, app: &LeaveApplication) -> bool {
    if let Some(employee_id) = &filter.employee_id {
        if app.employee_id != *employee_id {
            return false;
        }
    }
    if let Some(department) = &filter.department {
        if app.department != *department {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if app.status != status {
            return false;
        }
    }
    true
}

#[async_trait]
impl WorkflowStore for MemoryStore {
    async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put_user(&self, user: User) -> Result<(), StoreError> {
        self.users.write().await.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_application(&self, id: &str) -> Result<LeaveApplication, StoreError> {
        self.applications
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_application(&self, record: LeaveApplication) -> Result<(), StoreError> {
        self.applications
            .write()
            .await
            .insert(record.id.clone(), record);
        Ok(())
    }

    async fn update_application(
        &self,
        record: LeaveApplication,
        expected: LeaveStatus,
    ) -> Result<bool, StoreError> {
        let mut applications = self.applications.write().await;
        let stored = applications.get_mut(&record.id).ok_or(StoreError::NotFound)?;
        if stored.status != expected {
            return Ok(false);
        }
        *stored = record;
        Ok(true)
    }

    async fn query_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        let applications = self.applications.read().await;
        let mut out: Vec<LeaveApplication> = applications
            .values()
            .filter(|app| matches(&filter, app))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(out)
    }

    async fn read_balance(
        &self,
        user_id: &str,
        category: LeaveCategory,
    ) -> Result<CategoryBalance, StoreError> {
        let users = self.users.read().await;
        let user = users.get(user_id).ok_or(StoreError::NotFound)?;
        Ok(user.balance.get(category))
    }

    async fn update_ledger(
        &self,
        user_id: &str,
        category: LeaveCategory,
        expected_used: u32,
        new_used: u32,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(StoreError::NotFound)?;
        if user.balance.get(category).used != expected_used {
            return Ok(false);
        }
        user.balance.set_used(category, new_used);
        Ok(true)
    }
}
