use serde::{Deserialize, Serialize};

/// Domain events handed to the notification collaborator after a
/// transition has been persisted. Delivery is fire-and-forget: a failed
/// notification never rolls back or fails the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    Submitted {
        application_id: String,
        employee_id: String,
    },
    SupervisorDecided {
        application_id: String,
        approved: bool,
    },
    HodDecided {
        application_id: String,
        approved: bool,
    },
    Recorded {
        application_id: String,
    },
}
