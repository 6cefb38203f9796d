use std::{net::SocketAddr, sync::Arc};
use subtrack::analytics::derive_today;
use subtrack::store::ListSnapshot;
use subtrack::{router, AppState, Config, HttpSubscriptionApi};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let api = HttpSubscriptionApi::new(&config.api_url, config.api_timeout)?;
    info!("using subscriptions API at {}", api.base_url());

    let state = AppState::new(Arc::new(api));
    tokio::spawn(watch_changes(state.manager.store().subscribe()));

    if let Err(err) = state.manager.list().await {
        warn!("starting with an empty list: {err}");
    }

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Logs the headline figures each time the list is replaced.
async fn watch_changes(mut rx: watch::Receiver<ListSnapshot>) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        let analytics = derive_today(&snapshot.records);
        info!(
            version = snapshot.version,
            active = analytics.active_count,
            expired = analytics.expired_count,
            spend = analytics.total_active_spend,
            expiring = analytics.upcoming_renewals,
            "dashboard figures updated"
        );
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
