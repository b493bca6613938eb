use actix_web::{error, web};

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schema;

use errors::ServerError;

/// Registers the note routes. The pool must be added as app data by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        error::Error::from(ServerError::UserError(err.to_string()))
    }))
    .app_data(
        web::PathConfig::default().error_handler(|_err, _req| ServerError::NotFound.into()),
    )
    .service(
        web::resource("/notes")
            .route(web::post().to(handlers::note::create))
            .route(web::get().to(handlers::note::list)),
    )
    .service(
        web::resource("/notes/{id}")
            .route(web::put().to(handlers::note::update))
            .route(web::delete().to(handlers::note::delete)),
    );
}
