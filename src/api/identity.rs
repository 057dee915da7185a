//! Identity extractor.
//!
//! The session layer in front of this service authenticates the caller
//! and forwards the `(actor id, actor role)` tuple in headers. The core
//! trusts that tuple as authenticated input and never re-derives the
//! role from naming conventions.

use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

use crate::model::role::Role;
use crate::model::user::Actor;

pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

impl FromRequest for Actor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = match req
            .headers()
            .get(ACTOR_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            Some(v) => v.to_string(),
            None => return ready(Err(ErrorUnauthorized("Missing actor identity"))),
        };

        let role = match req
            .headers()
            .get(ACTOR_ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.parse::<Role>().ok())
        {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Missing or invalid actor role"))),
        };

        ready(Ok(Actor { id, role }))
    }
}

impl Actor {
    pub fn require_hr(&self) -> actix_web::Result<()> {
        if self.role == Role::Hr {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("HR only"))
        }
    }
}
