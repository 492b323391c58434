//! Forward-only migration runner.
//!
//! Applied migrations are recorded in `_migrations` keyed by module and id,
//! so re-running the full set on every boot is a no-op for known entries.

use rusqlite::{params, Connection, OptionalExtension};

use marquee_kernel::Migration;

use crate::{Database, StoreError};

const LEDGER_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        PRIMARY KEY (module, id)
    );
"#;

impl Database {
    /// Apply every migration not yet recorded. Returns how many ran.
    pub async fn apply_migrations(
        &self,
        migrations: Vec<(String, Migration)>,
    ) -> Result<usize, StoreError> {
        self.call(move |conn| apply(conn, &migrations)).await
    }
}

fn apply(conn: &mut Connection, migrations: &[(String, Migration)]) -> Result<usize, StoreError> {
    conn.execute_batch(LEDGER_DDL)?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let seen = conn
            .query_row(
                "SELECT 1 FROM _migrations WHERE module = ?1 AND id = ?2",
                params![module, migration.id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if seen {
            tracing::debug!(target: "marquee-db", %module, id = migration.id, "migration already applied");
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(migration.up)?;
        tx.execute(
            "INSERT INTO _migrations (module, id) VALUES (?1, ?2)",
            params![module, migration.id],
        )?;
        tx.commit()?;

        tracing::info!(target: "marquee-db", %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
