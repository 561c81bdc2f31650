// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .route("/health/upstream", web::get().to(handlers::upstream_health))
            .service(
                web::scope("/sessions")
                    .route("", web::post().to(handlers::create_session))
                    .route("/{id}", web::get().to(handlers::get_session))
                    .route("/{id}", web::delete().to(handlers::delete_session))
                    .route("/{id}/fields", web::put().to(handlers::update_field))
                    .route("/{id}/submit", web::post().to(handlers::submit_session))
                    .route("/{id}/reset", web::post().to(handlers::reset_session))
            )
    );
}
