use crate::{
    api::{leave, reports, users},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::post().to(leave::submit_leave))
                            .route(web::get().to(leave::my_leave_history)),
                    )
                    // /leave/{id}
                    .service(web::resource("/{id}").route(web::get().to(leave::get_leave)))
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve").route(web::put().to(leave::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(leave::reject_leave)),
                    )
                    // /leave/{id}/cancel
                    .service(
                        web::resource("/{id}/cancel").route(web::put().to(leave::cancel_leave)),
                    )
                    // /leave/{id}/record
                    .service(
                        web::resource("/{id}/record").route(web::put().to(leave::record_leave)),
                    ),
            )
            .service(
                web::scope("/users")
                    // /users
                    .service(web::resource("").route(web::post().to(users::create_user)))
                    // /users/{id}/balances
                    .service(
                        web::resource("/{id}/balances").route(web::get().to(users::get_balances)),
                    ),
            )
            .service(
                web::scope("/reports")
                    // /reports
                    .service(web::resource("").route(web::get().to(reports::all_applications)))
                    // /reports/supervisor
                    .service(
                        web::resource("/supervisor")
                            .route(web::get().to(reports::pending_for_supervisor)),
                    )
                    // /reports/hod
                    .service(web::resource("/hod").route(web::get().to(reports::pending_for_hod)))
                    // /reports/department/{dept}
                    .service(
                        web::resource("/department/{dept}")
                            .route(web::get().to(reports::by_department)),
                    ),
            ),
    );
}
