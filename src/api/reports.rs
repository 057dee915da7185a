use actix_web::{HttpResponse, Responder, web};

use crate::api::{AppService, error_response};
use crate::model::role::Role;
use crate::model::user::Actor;

/* =========================
Pending queue for the calling supervisor
========================= */
pub async fn pending_for_supervisor(
    actor: Actor,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    if actor.role != Role::Supervisor {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "message": "Supervisors only"
        })));
    }
    match service.pending_for_supervisor(&actor.id).await {
        Ok(apps) => Ok(HttpResponse::Ok().json(apps)),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Pending queue for the calling HOD
========================= */
pub async fn pending_for_hod(
    actor: Actor,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    if actor.role != Role::Hod {
        return Ok(HttpResponse::Forbidden().json(serde_json::json!({
            "message": "Department heads only"
        })));
    }
    match service.pending_for_hod(&actor.id).await {
        Ok(apps) => Ok(HttpResponse::Ok().json(apps)),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Department report (HR)
========================= */
pub async fn by_department(
    actor: Actor,
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    actor.require_hr()?;
    match service.by_department(&path.into_inner()).await {
        Ok(apps) => Ok(HttpResponse::Ok().json(apps)),
        Err(e) => Ok(error_response(&e)),
    }
}

/* =========================
Full history (HR)
========================= */
pub async fn all_applications(
    actor: Actor,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    actor.require_hr()?;
    match service.all().await {
        Ok(apps) => Ok(HttpResponse::Ok().json(apps)),
        Err(e) => Ok(error_response(&e)),
    }
}
