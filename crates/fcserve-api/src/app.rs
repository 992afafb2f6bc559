//! Server startup and shutdown.

use std::sync::Arc;

use fcserve_core::config::AppConfig;
use fcserve_core::AppResult;
use fcserve_core::error::{AppError, ErrorKind};
use fcserve_engine::{AssetStore, Pipeline};

use crate::router::build_router;
use crate::state::AppState;

/// Wire the pipeline into the router and serve until a shutdown signal.
///
/// In-flight requests are allowed to finish; their workspaces are removed
/// as each flow completes.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting fcserve v{}", env!("CARGO_PKG_VERSION"));

    let assets = AssetStore::load(&config.engine)?;
    let pipeline = Pipeline::new(&config, Arc::new(assets))?;

    tracing::info!(
        models = %pipeline.catalog().directory().display(),
        temp_root = %pipeline.temp_root().display(),
        engine = %config.engine.executable,
        timeout_seconds = config.engine.timeout_seconds,
        "Engine pipeline ready"
    );

    let addr = config.server.bind_address();
    let app = build_router(AppState::new(config, pipeline));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}: {e}"), e)
        })?;

    tracing::info!("fcserve listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, draining in-flight requests...");
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Server error: {e}"), e))?;

    tracing::info!("fcserve shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
