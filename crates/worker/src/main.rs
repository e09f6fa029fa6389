use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rdvtrack_sync::{PgStore, Synchronizer};
use rdvtrack_timeone::{TimeOneClient, TimeOneConfig};
use rdvtrack_worker::config::WorkerConfig;
use rdvtrack_worker::scheduler;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rdvtrack_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();
    tracing::info!(?config, "Worker starting");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = rdvtrack_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    rdvtrack_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let feed_config = TimeOneConfig::from_env().expect("Invalid TimeOne configuration");
    let client = TimeOneClient::new(feed_config).expect("Failed to build TimeOne client");
    let sync = Arc::new(Synchronizer::new(
        Arc::new(client),
        Arc::new(PgStore::new(pool)),
    ));

    let cancel = tokio_util::sync::CancellationToken::new();
    let handle = tokio::spawn(scheduler::run(sync, config, cancel.clone()));

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(30), handle).await;
    tracing::info!("Worker stopped");
}
