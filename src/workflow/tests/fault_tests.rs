//! Failing-store behavior: a debit that cannot be committed must leave
//! the application retryable, and stalled persistence calls must surface
//! as `PersistenceFailure` instead of hanging the operation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::model::category::LeaveCategory;
use crate::model::leave_application::LeaveApplication;
use crate::model::status::LeaveStatus;
use crate::model::user::{CategoryBalance, User};
use crate::notify::test_support::CapturingNotifier;
use crate::store::memory::MemoryStore;
use crate::store::{ApplicationFilter, StoreError, WorkflowStore};
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::tests::helpers::{annual_request, hod, seed_org, supervisor};

/// Refuses a set number of ledger writes, then recovers.
struct FlakyLedgerStore {
    inner: MemoryStore,
    failures_left: AtomicU32,
}

impl FlakyLedgerStore {
    fn failing(times: u32) -> Self {
        Self {
            inner: MemoryStore::new(),
            failures_left: AtomicU32::new(times),
        }
    }
}

#[async_trait]
impl WorkflowStore for FlakyLedgerStore {
    async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        self.inner.get_user(id).await
    }

    async fn put_user(&self, user: User) -> Result<(), StoreError> {
        self.inner.put_user(user).await
    }

    async fn get_application(&self, id: &str) -> Result<LeaveApplication, StoreError> {
        self.inner.get_application(id).await
    }

    async fn insert_application(&self, record: LeaveApplication) -> Result<(), StoreError> {
        self.inner.insert_application(record).await
    }

    async fn update_application(
        &self,
        record: LeaveApplication,
        expected: LeaveStatus,
    ) -> Result<bool, StoreError> {
        self.inner.update_application(record, expected).await
    }

    async fn query_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        self.inner.query_applications(filter).await
    }

    async fn read_balance(
        &self,
        user_id: &str,
        category: LeaveCategory,
    ) -> Result<CategoryBalance, StoreError> {
        self.inner.read_balance(user_id, category).await
    }

    async fn update_ledger(
        &self,
        user_id: &str,
        category: LeaveCategory,
        expected_used: u32,
        new_used: u32,
    ) -> Result<bool, StoreError> {
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(StoreError::Backend("ledger write refused".to_string()));
        }
        self.inner
            .update_ledger(user_id, category, expected_used, new_used)
            .await
    }
}

/// Delays application reads past any reasonable service timeout.
struct StalledStore {
    inner: MemoryStore,
    delay: Duration,
}

#[async_trait]
impl WorkflowStore for StalledStore {
    async fn get_user(&self, id: &str) -> Result<User, StoreError> {
        self.inner.get_user(id).await
    }

    async fn put_user(&self, user: User) -> Result<(), StoreError> {
        self.inner.put_user(user).await
    }

    async fn get_application(&self, id: &str) -> Result<LeaveApplication, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get_application(id).await
    }

    async fn insert_application(&self, record: LeaveApplication) -> Result<(), StoreError> {
        self.inner.insert_application(record).await
    }

    async fn update_application(
        &self,
        record: LeaveApplication,
        expected: LeaveStatus,
    ) -> Result<bool, StoreError> {
        self.inner.update_application(record, expected).await
    }

    async fn query_applications(
        &self,
        filter: ApplicationFilter,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        self.inner.query_applications(filter).await
    }

    async fn read_balance(
        &self,
        user_id: &str,
        category: LeaveCategory,
    ) -> Result<CategoryBalance, StoreError> {
        self.inner.read_balance(user_id, category).await
    }

    async fn update_ledger(
        &self,
        user_id: &str,
        category: LeaveCategory,
        expected_used: u32,
        new_used: u32,
    ) -> Result<bool, StoreError> {
        self.inner
            .update_ledger(user_id, category, expected_used, new_used)
            .await
    }
}

#[tokio::test]
async fn failed_debit_reverts_the_status_and_a_retry_debits_once() {
    let store = Arc::new(FlakyLedgerStore::failing(1));
    let notifier = Arc::new(CapturingNotifier::default());
    let service = WorkflowService::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        Duration::from_secs(5),
    );
    for user in seed_org() {
        service.register_user(user).await.unwrap();
    }

    let id = service.submit(annual_request()).await.unwrap();
    service.decide(&id, &supervisor(), true, None).await.unwrap();

    // The status claim lands, the debit does not; the claim is rolled
    // back so the operation stays retryable.
    assert_eq!(
        service.decide(&id, &hod(), true, None).await,
        Err(WorkflowError::PersistenceFailure)
    );
    let app = service.application(&id).await.unwrap();
    assert_eq!(app.status, LeaveStatus::ApprovedBySupervisor);
    let balance = store
        .read_balance("emp-1", LeaveCategory::Annual)
        .await
        .unwrap();
    assert_eq!(balance.used, 0);
    // No HOD decision event was emitted for the failed attempt.
    assert_eq!(notifier.events().len(), 2);

    // Retrying the whole operation succeeds and debits exactly once.
    service.decide(&id, &hod(), true, None).await.unwrap();
    let app = service.application(&id).await.unwrap();
    assert_eq!(app.status, LeaveStatus::ApprovedByHod);
    let balance = store
        .read_balance("emp-1", LeaveCategory::Annual)
        .await
        .unwrap();
    assert_eq!(balance.used, 5);
    assert_eq!(notifier.events().len(), 3);
}

#[tokio::test]
async fn stalled_application_read_times_out_as_persistence_failure() {
    let store = Arc::new(StalledStore {
        inner: MemoryStore::new(),
        delay: Duration::from_millis(200),
    });
    let notifier = Arc::new(CapturingNotifier::default());
    let service = WorkflowService::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        Duration::from_millis(10),
    );
    for user in seed_org() {
        service.register_user(user).await.unwrap();
    }

    // Submission does not read applications, so it still goes through.
    let id = service.submit(annual_request()).await.unwrap();

    assert_eq!(
        service.decide(&id, &supervisor(), true, None).await,
        Err(WorkflowError::PersistenceFailure)
    );
    // Nothing was decided: the record is untouched in the backing store.
    let app = store.inner.get_application(&id).await.unwrap();
    assert_eq!(app.status, LeaveStatus::Pending);
    assert_eq!(notifier.events().len(), 1);
}
