//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    // An id that is not a UUID can never name a post
    .app_data(web::PathConfig::default().error_handler(|err, req| {
        AppError::NotFound(format!("No post at {}: {}", req.path(), err)).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::create))
                    // Named listings must come before `/{id}`
                    .route("/drafts", web::get().to(posts::drafts))
                    .route("/all", web::get().to(posts::all))
                    .route("/{id}", web::get().to(posts::show))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::destroy)),
            ),
    );
}
