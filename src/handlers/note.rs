use actix_web::web;
use diesel::sqlite::SqliteConnection;

use super::Pool;
use crate::errors::{DbError, ServerError};

pub mod mutate;
pub mod post;
pub mod query;

pub use mutate::{delete, update};
pub use post::create;
pub use query::list;

/// Runs one store call on the blocking pool. Any failure is logged and
/// answered with `failure` only.
async fn with_connection<T, F>(
    pool: web::Data<Pool>,
    failure: &'static str,
    call: F,
) -> Result<T, ServerError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || -> Result<T, DbError> {
        let mut connection = pool.get()?;
        Ok(call(&mut connection)?)
    })
    .await
    .map_err(DbError::from)
    .and_then(|outcome| outcome)
    .map_err(|e| {
        log::error!("{failure}: {e}");
        ServerError::StoreError(failure)
    })
}
