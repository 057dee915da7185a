use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::model::category::LeaveCategory;
use crate::model::role::Role;
use crate::model::user::{Actor, LeaveBalance, User};
use crate::notify::test_support::CapturingNotifier;
use crate::store::memory::MemoryStore;
use crate::workflow::service::{SubmitLeave, WorkflowService};

pub type TestService = WorkflowService<MemoryStore, Arc<CapturingNotifier>>;

pub struct Harness {
    pub service: Arc<TestService>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<CapturingNotifier>,
}

/// Service over a fresh in-memory store with a small seeded org chart:
/// employee `emp-1` (department `ops`) reporting to supervisor `sup-1`
/// and HOD `hod-1`, plus HR user `hr-1`.
pub async fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(CapturingNotifier::default());
    let service = Arc::new(WorkflowService::new(
        Arc::clone(&store),
        Arc::clone(&notifier),
        Duration::from_secs(5),
    ));

    for user in seed_org() {
        service.register_user(user).await.unwrap();
    }

    Harness {
        service,
        store,
        notifier,
    }
}

pub fn seed_org() -> Vec<User> {
    vec![
        User {
            id: "emp-1".to_string(),
            name: "Asha Rahman".to_string(),
            role: Role::Employee,
            department: "ops".to_string(),
            supervisor_id: Some("sup-1".to_string()),
            hod_id: Some("hod-1".to_string()),
            balance: LeaveBalance::standard(),
        },
        User {
            id: "sup-1".to_string(),
            name: "Karim Uddin".to_string(),
            role: Role::Supervisor,
            department: "ops".to_string(),
            supervisor_id: None,
            hod_id: Some("hod-1".to_string()),
            balance: LeaveBalance::standard(),
        },
        User {
            id: "hod-1".to_string(),
            name: "Farzana Haque".to_string(),
            role: Role::Hod,
            department: "ops".to_string(),
            supervisor_id: None,
            hod_id: None,
            balance: LeaveBalance::standard(),
        },
        User {
            id: "hr-1".to_string(),
            name: "Nusrat Jahan".to_string(),
            role: Role::Hr,
            department: "hr".to_string(),
            supervisor_id: None,
            hod_id: None,
            balance: LeaveBalance::standard(),
        },
    ]
}

pub fn supervisor() -> Actor {
    Actor {
        id: "sup-1".to_string(),
        role: Role::Supervisor,
    }
}

pub fn hod() -> Actor {
    Actor {
        id: "hod-1".to_string(),
        role: Role::Hod,
    }
}

pub fn hr() -> Actor {
    Actor {
        id: "hr-1".to_string(),
        role: Role::Hr,
    }
}

/// Five working days of annual leave for `emp-1`.
pub fn annual_request() -> SubmitLeave {
    SubmitLeave {
        employee_id: "emp-1".to_string(),
        category: LeaveCategory::Annual,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
        reason: "family visit".to_string(),
        proof_link: None,
    }
}
