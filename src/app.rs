use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use marquee_db::{Database, DbModule};
use marquee_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// A booted application: migrations applied and every module started.
pub struct App {
    settings: Settings,
    registry: ModuleRegistry,
}

/// Build the registry, open the store, apply migrations, and boot modules.
pub async fn bootstrap(settings: Settings) -> anyhow::Result<App> {
    let db = Database::connect(&settings.database).context("failed to open movie store")?;
    let registry = build_registry(&db);

    let applied = db
        .apply_migrations(registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;
    tracing::info!(applied, "migrations up to date");

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.boot(&ctx).await?;

    Ok(App { settings, registry })
}

fn build_registry(db: &Database) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DbModule::new(db.clone())));
    modules::register_all(&mut registry, db);
    registry
}

impl App {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Full HTTP router with every module mounted.
    pub fn router(&self) -> Router {
        marquee_http::build_router(&self.registry, &self.settings)
    }

    /// Serve on the configured address until `shutdown`, then stop modules.
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let served = marquee_http::start_server(&self.registry, &self.settings, shutdown).await;
        self.finish(served).await
    }

    /// Serve on an already-bound listener until `shutdown`, then stop modules.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let served = marquee_http::serve(listener, self.router(), shutdown).await;
        self.finish(served).await
    }

    async fn finish(self, served: anyhow::Result<()>) -> anyhow::Result<()> {
        let stopped = self.registry.shutdown().await;
        served?;
        stopped
    }
}

/// Run the server until Ctrl-C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    bootstrap(settings).await?.serve(shutdown_signal()).await
}

/// Open the store and apply pending migrations without serving.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let db = Database::connect(&settings.database).context("failed to open movie store")?;
    let applied = db
        .apply_migrations(build_registry(&db).collect_migrations())
        .await?;
    Ok(applied)
}

/// Resolves on Ctrl-C (and SIGTERM on unix).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
