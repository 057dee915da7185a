pub mod identity;
pub mod leave;
pub mod reports;
pub mod users;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::notify::LogNotifier;
use crate::store::memory::MemoryStore;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;

/// Concrete service type the server wires up.
pub type AppService = WorkflowService<MemoryStore, LogNotifier>;

/// Maps a workflow error onto the HTTP surface.
pub(crate) fn error_response(err: &WorkflowError) -> HttpResponse {
    let status = match err {
        WorkflowError::EmployeeNotFound | WorkflowError::NotFound => StatusCode::NOT_FOUND,
        WorkflowError::InvalidDateRange
        | WorkflowError::InsufficientBalance { .. }
        | WorkflowError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
        WorkflowError::Unauthorized => StatusCode::UNAUTHORIZED,
        WorkflowError::Forbidden => StatusCode::FORBIDDEN,
        WorkflowError::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
    };
    HttpResponse::build(status).json(serde_json::json!({
        "message": err.to_string()
    }))
}
