//! Workflow service: the public API of the approval core.
//!
//! Every operation is one logical unit: validate, transition via the
//! state machine, apply the ledger effect when the table specifies one,
//! persist, then emit the domain event. Transitions land through the
//! store's conditional write, so a racing caller on the same application
//! observes `InvalidTransition` instead of clobbering the winner.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::model::category::LeaveCategory;
use crate::model::event::DomainEvent;
use crate::model::leave_application::LeaveApplication;
use crate::model::role::Role;
use crate::model::status::LeaveStatus;
use crate::model::user::{Actor, CategoryBalance, User};
use crate::notify::Notifier;
use crate::store::{ApplicationFilter, StoreError, WorkflowStore};
use crate::workflow::error::WorkflowError;
use crate::workflow::ledger;
use crate::workflow::transition::{self, Action, Stage};

/// Submission parameters.
#[derive(Debug, Clone)]
pub struct SubmitLeave {
    pub employee_id: String,
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub proof_link: Option<String>,
}

/// Per-category balance view for reporting.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BalanceView {
    pub category: LeaveCategory,
    pub allotted: u32,
    pub used: u32,
    pub remaining: i64,
}

pub struct WorkflowService<S, N> {
    store: Arc<S>,
    notifier: N,
    persist_timeout: Duration,
}

impl<S: WorkflowStore, N: Notifier> WorkflowService<S, N> {
    pub fn new(store: Arc<S>, notifier: N, persist_timeout: Duration) -> Self {
        Self {
            store,
            notifier,
            persist_timeout,
        }
    }

    /// Bounds a store call with the configured timeout. Expiry and backend
    /// failures both surface as `PersistenceFailure`; the caller must not
    /// assume the write happened.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, WorkflowError> {
        match tokio::time::timeout(self.persist_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(StoreError::NotFound)) => Err(WorkflowError::NotFound),
            Ok(Err(StoreError::Backend(msg))) => {
                error!(error = %msg, "store call failed");
                Err(WorkflowError::PersistenceFailure)
            }
            Err(_) => {
                warn!(timeout_ms = self.persist_timeout.as_millis() as u64, "store call timed out");
                Err(WorkflowError::PersistenceFailure)
            }
        }
    }

    /// Registers or replaces a user record (account provisioning is the
    /// outer application's job; this is the hand-off point).
    pub async fn register_user(&self, user: User) -> Result<(), WorkflowError> {
        self.bounded(self.store.put_user(user)).await
    }

    /// Submits a new leave application and returns its id.
    ///
    /// The balance ceiling is enforced here, once, before the record is
    /// created; later transitions only ever debit what was checked.
    pub async fn submit(&self, req: SubmitLeave) -> Result<String, WorkflowError> {
        if req.end_date < req.start_date {
            return Err(WorkflowError::InvalidDateRange);
        }
        let employee = self
            .bounded(self.store.get_user(&req.employee_id))
            .await
            .map_err(|e| match e {
                WorkflowError::NotFound => WorkflowError::EmployeeNotFound,
                other => other,
            })?;

        // Inclusive day count, frozen at submission.
        let span = (req.end_date - req.start_date).num_days() + 1;
        let number_of_days =
            u32::try_from(span).map_err(|_| WorkflowError::InvalidDateRange)?;

        let available = ledger::remaining(self.store.as_ref(), &req.employee_id, req.category)
            .await?;
        if i64::from(number_of_days) > available {
            return Err(WorkflowError::InsufficientBalance {
                available,
                requested: number_of_days,
            });
        }

        let record = LeaveApplication {
            id: Uuid::new_v4().to_string(),
            employee_id: req.employee_id.clone(),
            department: employee.department.clone(),
            category: req.category,
            start_date: req.start_date,
            end_date: req.end_date,
            number_of_days,
            reason: req.reason,
            proof_link: req.proof_link,
            status: LeaveStatus::Pending,
            applied_at: Utc::now(),
            supervisor_action_at: None,
            supervisor_feedback: None,
            hod_action_at: None,
            hod_feedback: None,
            captured_by: None,
            captured_at: None,
        };
        let application_id = record.id.clone();
        self.bounded(self.store.insert_application(record)).await?;

        info!(
            application_id = %application_id,
            employee_id = %req.employee_id,
            category = %req.category,
            number_of_days,
            "leave application submitted"
        );
        self.notifier.notify(DomainEvent::Submitted {
            application_id: application_id.clone(),
            employee_id: req.employee_id,
        });
        Ok(application_id)
    }

    /// Approves or rejects the application at its current stage.
    ///
    /// The stage is resolved from the stored status, the actor is checked
    /// against the employee's reporting links, and the status change lands
    /// via conditional write. HOD approval additionally debits the ledger.
    ///
    /// A caller racing a concurrent decision on the same application gets
    /// `InvalidTransition` if it loses the conditional write, or
    /// `Unauthorized` if it reads the record after the other decision
    /// landed and the new stage no longer matches its role.
    pub async fn decide(
        &self,
        application_id: &str,
        actor: &Actor,
        approve: bool,
        feedback: Option<String>,
    ) -> Result<(), WorkflowError> {
        let action = if approve { Action::Approve } else { Action::Reject };
        let app = self
            .bounded(self.store.get_application(application_id))
            .await?;
        let stage = Stage::of(app.status).ok_or(WorkflowError::InvalidTransition {
            from: app.status,
            action,
        })?;
        let employee = self
            .bounded(self.store.get_user(&app.employee_id))
            .await
            .map_err(|e| match e {
                WorkflowError::NotFound => WorkflowError::EmployeeNotFound,
                other => other,
            })?;
        transition::authorize_decider(stage, actor, &employee)?;

        let from = app.status;
        let to = transition::next_status(from, action)?;
        let now = Utc::now();
        let mut updated = app.clone();
        updated.status = to;
        match stage {
            Stage::Supervisor => {
                updated.supervisor_action_at = Some(now);
                updated.supervisor_feedback = feedback;
            }
            Stage::Hod => {
                updated.hod_action_at = Some(now);
                updated.hod_feedback = feedback;
            }
        }

        if !self.bounded(self.store.update_application(updated, from)).await? {
            // Another decision landed between our read and our write.
            return Err(WorkflowError::InvalidTransition { from, action });
        }

        if transition::debits_ledger(from, to) {
            let debit = ledger::apply(
                self.store.as_ref(),
                &app.employee_id,
                app.category,
                app.number_of_days,
                false,
            );
            let outcome = match tokio::time::timeout(self.persist_timeout, debit).await {
                Ok(result) => result,
                Err(_) => Err(WorkflowError::PersistenceFailure),
            };
            if let Err(err) = outcome {
                // Status moved but the debit did not land: compensate so a
                // retry of the whole operation is safe.
                error!(
                    application_id = %application_id,
                    employee_id = %app.employee_id,
                    error = %err,
                    "ledger debit failed after status change, reverting"
                );
                match self.store.update_application(app.clone(), to).await {
                    Ok(true) => {}
                    Ok(false) | Err(_) => {
                        error!(
                            application_id = %application_id,
                            "status revert failed, manual reconciliation needed"
                        );
                    }
                }
                return Err(err);
            }
        }

        info!(
            application_id = %application_id,
            employee_id = %app.employee_id,
            from = %from,
            to = %to,
            actor_id = %actor.id,
            "leave application decided"
        );
        let event = match stage {
            Stage::Supervisor => DomainEvent::SupervisorDecided {
                application_id: application_id.to_string(),
                approved: approve,
            },
            Stage::Hod => DomainEvent::HodDecided {
                application_id: application_id.to_string(),
                approved: approve,
            },
        };
        self.notifier.notify(event);
        Ok(())
    }

    /// Cancels a pending application. Only the employee who filed it may
    /// cancel, and only while no decision has been taken. No ledger
    /// effect: nothing had been debited yet.
    pub async fn cancel(
        &self,
        application_id: &str,
        requester_id: &str,
    ) -> Result<(), WorkflowError> {
        let app = self
            .bounded(self.store.get_application(application_id))
            .await?;
        if app.employee_id != requester_id {
            return Err(WorkflowError::Forbidden);
        }
        let from = app.status;
        let to = transition::next_status(from, Action::Cancel)?;
        let mut updated = app;
        updated.status = to;
        if !self.bounded(self.store.update_application(updated, from)).await? {
            return Err(WorkflowError::InvalidTransition {
                from,
                action: Action::Cancel,
            });
        }
        info!(application_id = %application_id, requester_id = %requester_id, "leave application cancelled");
        Ok(())
    }

    /// HR records a fully approved application into the personnel file.
    /// The ledger was already debited at HOD approval; this step performs
    /// no second debit.
    pub async fn record_by_hr(
        &self,
        application_id: &str,
        actor: &Actor,
    ) -> Result<(), WorkflowError> {
        if actor.role != Role::Hr {
            return Err(WorkflowError::Forbidden);
        }
        let app = self
            .bounded(self.store.get_application(application_id))
            .await?;
        let from = app.status;
        let to = transition::next_status(from, Action::Record)?;
        let mut updated = app;
        updated.status = to;
        updated.captured_by = Some(actor.id.clone());
        updated.captured_at = Some(Utc::now());
        if !self.bounded(self.store.update_application(updated, from)).await? {
            return Err(WorkflowError::InvalidTransition {
                from,
                action: Action::Record,
            });
        }
        info!(application_id = %application_id, hr_user = %actor.id, "leave application recorded");
        self.notifier.notify(DomainEvent::Recorded {
            application_id: application_id.to_string(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only queries
    // ------------------------------------------------------------------

    pub async fn application(&self, application_id: &str) -> Result<LeaveApplication, WorkflowError> {
        self.bounded(self.store.get_application(application_id)).await
    }

    /// Pending applications waiting on this supervisor, newest first.
    pub async fn pending_for_supervisor(
        &self,
        supervisor_id: &str,
    ) -> Result<Vec<LeaveApplication>, WorkflowError> {
        let pending = self
            .bounded(self.store.query_applications(ApplicationFilter {
                status: Some(LeaveStatus::Pending),
                ..Default::default()
            }))
            .await?;
        self.scoped_to_decider(pending, |user| user.supervisor_id.as_deref() == Some(supervisor_id))
            .await
    }

    /// Supervisor-approved applications waiting on this HOD, newest first.
    pub async fn pending_for_hod(
        &self,
        hod_id: &str,
    ) -> Result<Vec<LeaveApplication>, WorkflowError> {
        let pending = self
            .bounded(self.store.query_applications(ApplicationFilter {
                status: Some(LeaveStatus::ApprovedBySupervisor),
                ..Default::default()
            }))
            .await?;
        self.scoped_to_decider(pending, |user| user.hod_id.as_deref() == Some(hod_id))
            .await
    }

    pub async fn by_department(
        &self,
        department: &str,
    ) -> Result<Vec<LeaveApplication>, WorkflowError> {
        self.bounded(self.store.query_applications(ApplicationFilter {
            department: Some(department.to_string()),
            ..Default::default()
        }))
        .await
    }

    pub async fn all(&self) -> Result<Vec<LeaveApplication>, WorkflowError> {
        self.bounded(self.store.query_applications(ApplicationFilter::default()))
            .await
    }

    /// Full history for one employee, newest first.
    pub async fn history(&self, employee_id: &str) -> Result<Vec<LeaveApplication>, WorkflowError> {
        self.bounded(self.store.query_applications(ApplicationFilter {
            employee_id: Some(employee_id.to_string()),
            ..Default::default()
        }))
        .await
    }

    /// Balance overview for one user, all categories.
    pub async fn balances(&self, user_id: &str) -> Result<Vec<BalanceView>, WorkflowError> {
        let user = self
            .bounded(self.store.get_user(user_id))
            .await
            .map_err(|e| match e {
                WorkflowError::NotFound => WorkflowError::EmployeeNotFound,
                other => other,
            })?;
        Ok(LeaveCategory::ALL
            .into_iter()
            .map(|category| {
                let CategoryBalance { allotted, used } = user.balance.get(category);
                BalanceView {
                    category,
                    allotted,
                    used,
                    remaining: i64::from(allotted) - i64::from(used),
                }
            })
            .collect())
    }

    /// Keeps only applications whose employee's reporting link satisfies
    /// the predicate. An application whose employee record has vanished is
    /// skipped rather than failing the whole listing.
    async fn scoped_to_decider<F>(
        &self,
        applications: Vec<LeaveApplication>,
        belongs: F,
    ) -> Result<Vec<LeaveApplication>, WorkflowError>
    where
        F: Fn(&User) -> bool,
    {
        let mut out = Vec::with_capacity(applications.len());
        for app in applications {
            match self.bounded(self.store.get_user(&app.employee_id)).await {
                Ok(user) => {
                    if belongs(&user) {
                        out.push(app);
                    }
                }
                Err(WorkflowError::NotFound) => {
                    warn!(
                        application_id = %app.id,
                        employee_id = %app.employee_id,
                        "application references a missing employee, skipping"
                    );
                }
                Err(other) => return Err(other),
            }
        }
        Ok(out)
    }
}
