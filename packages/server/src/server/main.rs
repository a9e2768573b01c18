use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use server_core::kernel::scheduled_tasks::start_scheduler;
use server_core::server::app::{build_app, build_deps};
use server_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (deps, runner) = build_deps();
    tokio::spawn(runner.run());

    // Keep the handle alive for the life of the process.
    let _scheduler = start_scheduler(deps.clone(), &config.announcement_refresh_cron).await?;

    let app = build_app(deps);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
