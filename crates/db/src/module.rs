use async_trait::async_trait;
use marquee_kernel::{InitCtx, Module};

use crate::Database;

/// Core module owning the store connection lifecycle.
pub struct DbModule {
    db: Database,
}

impl DbModule {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.db
            .call(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?))
            .await?;
        tracing::info!(
            module = self.name(),
            path = %ctx.settings.database.path,
            "database reachable"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.db
            .call(|conn| Ok(conn.execute_batch("PRAGMA optimize;")?))
            .await?;
        tracing::info!(module = self.name(), "database optimized for shutdown");
        Ok(())
    }
}
