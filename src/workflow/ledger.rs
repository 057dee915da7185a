//! Balance ledger operations.
//!
//! Read-modify-write on a (user, category) `used` counter goes through
//! the store's compare-and-set primitive and retries on conflict, so two
//! concurrent debits against the same counter both land. The counter is
//! clamped at a floor of zero; the allotted ceiling is deliberately NOT
//! re-checked here (it is enforced pre-emptively at submission).

use tracing::debug;

use crate::model::category::LeaveCategory;
use crate::store::{StoreError, WorkflowStore};
use crate::workflow::error::WorkflowError;

fn map_store(err: StoreError) -> WorkflowError {
    match err {
        StoreError::NotFound => WorkflowError::NotFound,
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "ledger store call failed");
            WorkflowError::PersistenceFailure
        }
    }
}

/// Applies a signed delta to the `used` counter and returns the new value.
/// `reverse` credits instead of debiting. Exactly one logical ledger
/// write per call.
pub async fn apply<S: WorkflowStore>(
    store: &S,
    user_id: &str,
    category: LeaveCategory,
    delta_days: u32,
    reverse: bool,
) -> Result<u32, WorkflowError> {
    loop {
        let balance = store
            .read_balance(user_id, category)
            .await
            .map_err(map_store)?;
        let new_used = if reverse {
            balance.used.saturating_sub(delta_days)
        } else {
            balance.used.saturating_add(delta_days)
        };
        if store
            .update_ledger(user_id, category, balance.used, new_used)
            .await
            .map_err(map_store)?
        {
            return Ok(new_used);
        }
        debug!(user_id, %category, "ledger CAS conflict, retrying");
    }
}

/// `allotted - used` for one counter. May be negative after an overdraw.
pub async fn remaining<S: WorkflowStore>(
    store: &S,
    user_id: &str,
    category: LeaveCategory,
) -> Result<i64, WorkflowError> {
    let balance = store
        .read_balance(user_id, category)
        .await
        .map_err(map_store)?;
    Ok(balance.remaining())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use crate::model::user::{LeaveBalance, User};
    use crate::store::memory::MemoryStore;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: id.to_string(),
            role: Role::Employee,
            department: "ops".to_string(),
            supervisor_id: None,
            hod_id: None,
            balance: LeaveBalance::standard(),
        }
    }

    #[tokio::test]
    async fn apply_debits_and_remaining_reflects_it() {
        let store = MemoryStore::new();
        store.put_user(user("emp-1")).await.unwrap();

        let used = apply(&store, "emp-1", LeaveCategory::Annual, 5, false)
            .await
            .unwrap();
        assert_eq!(used, 5);
        assert_eq!(
            remaining(&store, "emp-1", LeaveCategory::Annual)
                .await
                .unwrap(),
            16
        );
    }

    #[tokio::test]
    async fn reverse_clamps_at_zero() {
        let store = MemoryStore::new();
        store.put_user(user("emp-1")).await.unwrap();

        apply(&store, "emp-1", LeaveCategory::Sick, 3, false)
            .await
            .unwrap();
        let used = apply(&store, "emp-1", LeaveCategory::Sick, 10, true)
            .await
            .unwrap();
        assert_eq!(used, 0);
    }

    #[tokio::test]
    async fn apply_for_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let err = apply(&store, "ghost", LeaveCategory::Annual, 1, false)
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::NotFound);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_debits_on_same_counter_both_land() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        store.put_user(user("emp-1")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                apply(store.as_ref(), "emp-1", LeaveCategory::Annual, 2, false).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let balance = store
            .read_balance("emp-1", LeaveCategory::Annual)
            .await
            .unwrap();
        assert_eq!(balance.used, 16);
    }
}
