use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;

use crate::api::{AppService, error_response};
use crate::model::role::Role;
use crate::model::user::{Actor, LeaveBalance, User};

#[derive(Deserialize)]
pub struct CreateUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub department: String,
    pub supervisor_id: Option<String>,
    pub hod_id: Option<String>,
}

/* =========================
Register a user (HR)
========================= */
pub async fn create_user(
    actor: Actor,
    service: web::Data<AppService>,
    payload: web::Json<CreateUser>,
) -> actix_web::Result<impl Responder> {
    actor.require_hr()?;

    let payload = payload.into_inner();
    let user = User {
        id: payload.id.clone(),
        name: payload.name,
        role: payload.role,
        department: payload.department,
        supervisor_id: payload.supervisor_id,
        hod_id: payload.hod_id,
        balance: LeaveBalance::standard(),
    };
    match service.register_user(user).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "User registered",
            "id": payload.id
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Balance overview (self or HR)
========================= */
pub async fn get_balances(
    actor: Actor,
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let user_id = path.into_inner();
    if actor.role != Role::Hr && actor.id != user_id {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "message": "forbidden"
        })));
    }
    match service.balances(&user_id).await {
        Ok(balances) => Ok(HttpResponse::Ok().json(balances)),
        Err(e) => Ok(error_response(&e)),
    }
}
