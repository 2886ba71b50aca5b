//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the notification worker and the
//! Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::notification::Notifier;
use crate::domain::notification_worker::run_notification_worker;
use crate::infrastructure::notifier::{NullNotifier, PushoverNotifier};
use crate::infrastructure::persistence::PgShortLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Notifier (Pushover or NullNotifier fallback)
/// - Background notification worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let notifier = build_notifier(&config)?;
    let (notification_tx, notification_rx) = mpsc::channel(config.notify_queue_capacity);
    tokio::spawn(run_notification_worker(notification_rx, notifier));
    tracing::info!("Notification worker started");

    let repository = Arc::new(PgShortLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::new(
        repository,
        config.base_url.clone(),
        Duration::from_secs(config.store_timeout_secs),
    ));

    let state = AppState::new(
        link_service,
        notification_tx,
        config.behind_proxy,
        config.region.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    match (&config.pushover_token, &config.pushover_user) {
        (Some(token), Some(user)) => {
            let notifier = PushoverNotifier::new(
                config.pushover_url.clone(),
                token.clone(),
                user.clone(),
                Duration::from_secs(config.notify_timeout_secs),
            )
            .context("Failed to build notification client")?;
            tracing::info!("Push notifications enabled (Pushover)");
            Ok(Arc::new(notifier))
        }
        _ => {
            tracing::info!("Push notifications disabled (NullNotifier)");
            Ok(Arc::new(NullNotifier::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
