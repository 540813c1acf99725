use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veogen_api::config::{ServerConfig, StoreBackend};
use veogen_api::router::build_app_router;
use veogen_api::state::AppState;
use veogen_payments::PaymentsClient;
use veogen_store::{FsGenerationStore, GenerationStore, MemoryGenerationStore, StatusCache};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "veogen_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Generation record store ---
    let generations: Arc<dyn GenerationStore> = match config.store_backend {
        StoreBackend::Fs => {
            let store = FsGenerationStore::open(&config.generations_dir)
                .await
                .expect("Failed to open generations directory");
            tracing::info!(dir = %config.generations_dir, "Filesystem generation store opened");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("In-memory generation store selected; records will not survive restart");
            Arc::new(MemoryGenerationStore::new())
        }
    };

    // --- Webhook status cache (lifetime == process) ---
    let status_cache = Arc::new(StatusCache::new());

    // --- Payment processor client ---
    let payments = Arc::new(PaymentsClient::new(
        config.payments_api_base.clone(),
        config.payments_secret_key.clone(),
    ));
    tracing::info!(api_base = %config.payments_api_base, mode = ?config.payment_mode, "Payments client ready");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        generations,
        status_cache,
        payments,
    };

    // --- Router ---
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

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
