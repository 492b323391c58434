use rusqlite::ffi;
use thiserror::Error;

/// Failures surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("duplicate value for unique field '{field}'")]
    DuplicateKey { field: String },

    #[error("database error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("database connection lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            rusqlite::Error::SqliteFailure(code, message)
                if code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::DuplicateKey {
                    field: message
                        .as_deref()
                        .and_then(unique_column)
                        .unwrap_or("unknown")
                        .to_string(),
                }
            }
            _ => StoreError::Sqlite(err),
        }
    }
}

// "UNIQUE constraint failed: movies.name" -> "name"
fn unique_column(message: &str) -> Option<&str> {
    let columns = message.strip_prefix("UNIQUE constraint failed: ")?;
    let first = columns.split(',').next()?.trim();
    Some(first.rsplit('.').next().unwrap_or(first))
}
