pub mod api;
pub mod config;
pub mod upstream;

use std::net::SocketAddr;

use axum::Router;
use log::{info, warn};

use crate::config::AppConfig;
use crate::upstream::{UpstreamClient, UpstreamError};

#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        Ok(Self::new(UpstreamClient::new(&config.upstream)?))
    }
}

pub fn build_app(state: AppState) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
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

    info!("shutting down");
}
