//! axumサーバー起動・シャットダウンハンドリング

use crate::common::config::{ServerConfig, StoreConfig};
use crate::common::error::{EquipError, EquipResult};
use crate::{api, credential, AppState};
use tracing::info;

/// ストアを初期化してサーバーを起動し、シャットダウンシグナルを待機する
pub async fn run(server: ServerConfig, store: StoreConfig) -> EquipResult<()> {
    info!("Equiplog v{}", env!("CARGO_PKG_VERSION"));
    if store.uses_default_secret() {
        credential::warn_default_secret();
    }

    let state = AppState::from_config(&store).await?;
    let app = api::create_router(state);

    let bind_addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| EquipError::Internal(format!("Failed to bind to {}: {}", bind_addr, e)))?;

    info!("Equiplog server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| EquipError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
