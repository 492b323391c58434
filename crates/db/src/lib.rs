//! SQLite storage for marquee.
//!
//! A [`Database`] owns one connection. Calls are serialized through a mutex
//! and run on the blocking thread pool so async handlers never block the
//! runtime.

pub mod error;
pub mod migrate;
pub mod module;

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use rusqlite::Connection;

use marquee_kernel::settings::DatabaseSettings;

pub use error::StoreError;
pub use module::DbModule;

/// Cloneable handle to the store connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database file, creating parent directories.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database: {}", path.display()))?;
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;

        tracing::info!(target: "marquee-db", path = %path.display(), journal_mode = %mode, "database opened");
        Ok(Self::wrap(conn))
    }

    /// Open a private in-memory database; contents vanish with the last handle.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        tracing::info!(target: "marquee-db", "in-memory database opened");
        Ok(Self::wrap(conn))
    }

    /// Open the database described by configuration.
    pub fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        if settings.is_in_memory() {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(&settings.path))
        }
    }

    fn wrap(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the connection on the blocking pool.
    pub async fn call<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&mut guard)
        })
        .await?
    }
}
