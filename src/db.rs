use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;

use crate::errors::DbError;

pub type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const CREATE_NOTES: &str = "CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT 'Others'
        CHECK (category IN ('Work', 'Personal', 'Others')),
    created_at TIMESTAMP NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    updated_at TIMESTAMP NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)";

/// Store-side current time, millisecond precision so consecutive writes order.
pub const NOW: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

/// Applied to every pooled connection. Writers from different connections
/// wait on SQLite's lock instead of failing with `database is locked`.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub busy_timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        ConnectionOptions {
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!(
                "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL;",
                self.busy_timeout.as_millis()
            ))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Opens the pool and makes sure the notes table exists.
pub fn init_pool(database_url: &str) -> Result<Pool, DbError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(manager)?;
    let mut connection = pool.get()?;
    ensure_schema(&mut connection)?;
    Ok(pool)
}

/// Safe to run on every startup, existing rows are left alone.
pub fn ensure_schema(connection: &mut SqliteConnection) -> Result<(), DbError> {
    diesel::sql_query(CREATE_NOTES).execute(connection)?;
    Ok(())
}
