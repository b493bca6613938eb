use actix_web::{http::StatusCode, HttpResponse};
use derive_more::Display;

/// Failures reported to the caller. Store failures only carry a fixed message,
/// the underlying cause is logged where it happens.
#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "{}", _0)]
    UserError(String),
    #[display(fmt = "Note not found")]
    NotFound,
    #[display(fmt = "{}", _0)]
    StoreError(&'static str),
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::UserError(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

/// Errors raised while talking to the store.
#[derive(Debug, Display)]
pub enum DbError {
    #[display(fmt = "Pooling Error: {}", _0)]
    R2D2Error(r2d2::Error),
    #[display(fmt = "Diesel Error: {}", _0)]
    DieselError(diesel::result::Error),
    #[display(fmt = "Blocking Error: {}", _0)]
    BlockingError(actix_web::error::BlockingError),
}

impl From<r2d2::Error> for DbError {
    fn from(e: r2d2::Error) -> DbError {
        DbError::R2D2Error(e)
    }
}

impl From<diesel::result::Error> for DbError {
    fn from(e: diesel::result::Error) -> DbError {
        DbError::DieselError(e)
    }
}

impl From<actix_web::error::BlockingError> for DbError {
    fn from(e: actix_web::error::BlockingError) -> DbError {
        DbError::BlockingError(e)
    }
}

impl std::error::Error for DbError {}
