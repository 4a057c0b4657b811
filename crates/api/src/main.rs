use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use topicvault_api::bootstrap::ensure_admin;
use topicvault_api::config::ServerConfig;
use topicvault_api::router::build_app_router;
use topicvault_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "topicvault_api=debug,topicvault_service=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        data_dir = %config.data_dir.display(),
        "Loaded server configuration"
    );

    // --- Store ---
    let store = topicvault_db::open_store(&config.data_dir)
        .await
        .expect("Failed to open data directory");
    tracing::info!("Store opened");

    topicvault_db::health_check(&store)
        .await
        .expect("Store health check failed");
    tracing::info!("Store health check passed");

    ensure_admin(&store, config.bootstrap_admin_token.as_deref())
        .await
        .expect("Failed to bootstrap admin principal");

    // --- App state + router ---
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState::new(store);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // The drain after a shutdown signal is bounded by `shutdown_timeout`.
    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        notify.notify_one();
    });
    let mut serve_handle = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut serve_handle => report_exit(result),
        () = signalled.notified() => {
            match tokio::time::timeout(shutdown_timeout, &mut serve_handle).await {
                Ok(result) => report_exit(result),
                Err(_) => {
                    tracing::warn!(
                        drain_secs = shutdown_timeout.as_secs(),
                        "In-flight requests did not drain in time, aborting"
                    );
                    serve_handle.abort();
                }
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

fn report_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::info!("Server stopped accepting connections"),
        Ok(Err(err)) => tracing::error!(error = %err, "Server error"),
        Err(err) => tracing::error!(error = %err, "Server task failed"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
