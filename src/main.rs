use anyhow::Context;
use marquee_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load marquee settings")?;
    marquee_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.path,
        "marquee-app bootstrap starting"
    );

    marquee_app::run(settings).await
}
