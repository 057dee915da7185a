use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::{AppService, error_response};
use crate::model::category::LeaveCategory;
use crate::model::role::Role;
use crate::model::user::Actor;
use crate::workflow::service::SubmitLeave;

#[derive(Deserialize)]
pub struct CreateLeave {
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub proof_link: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct DecisionBody {
    pub feedback: Option<String>,
}

/* =========================
Submit leave request
========================= */
pub async fn submit_leave(
    actor: Actor,
    service: web::Data<AppService>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let req = SubmitLeave {
        employee_id: actor.id,
        category: payload.category,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason,
        proof_link: payload.proof_link,
    };
    match service.submit(req).await {
        Ok(application_id) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Leave request submitted",
            "application_id": application_id,
            "status": "pending"
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Approve / reject at the current stage
========================= */
pub async fn approve_leave(
    actor: Actor,
    service: web::Data<AppService>,
    path: web::Path<String>,
    payload: web::Json<DecisionBody>,
) -> actix_web::Result<impl Responder> {
    decide(actor, service, path.into_inner(), true, payload.into_inner()).await
}

pub async fn reject_leave(
    actor: Actor,
    service: web::Data<AppService>,
    path: web::Path<String>,
    payload: web::Json<DecisionBody>,
) -> actix_web::Result<impl Responder> {
    decide(actor, service, path.into_inner(), false, payload.into_inner()).await
}

async fn decide(
    actor: Actor,
    service: web::Data<AppService>,
    application_id: String,
    approve: bool,
    body: DecisionBody,
) -> actix_web::Result<HttpResponse> {
    match service
        .decide(&application_id, &actor, approve, body.feedback)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": if approve { "Leave approved" } else { "Leave rejected" }
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Cancel (employee, while pending)
========================= */
pub async fn cancel_leave(
    actor: Actor,
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    match service.cancel(&path.into_inner(), &actor.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Leave request cancelled"
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Record into the personnel file (HR)
========================= */
pub async fn record_leave(
    actor: Actor,
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    match service.record_by_hr(&path.into_inner(), &actor).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Leave recorded"
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Own leave history
========================= */
pub async fn my_leave_history(
    actor: Actor,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    match service.history(&actor.id).await {
        Ok(apps) => Ok(HttpResponse::Ok().json(apps)),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Fetch one application
========================= */
pub async fn get_leave(
    actor: Actor,
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    match service.application(&path.into_inner()).await {
        Ok(app) => {
            // Owner and HR may look; deciders use their queue endpoints.
            if actor.role != Role::Hr && actor.id != app.employee_id {
                return Ok(HttpResponse::Forbidden().json(serde_json::json!({
                    "message": "forbidden"
                })));
            }
            Ok(HttpResponse::Ok().json(app))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
