use log::{error, info};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::controller::Controller;
use crate::error::ShareError;
use crate::middleware::logging::log_listening;
use crate::protocol::build_router;
use crate::server::AppState;
use crate::session::SessionRegistry;

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Loads credentials, prepares the folder layout, and binds the listener.
    pub async fn new(config: &ServerConfig) -> Result<Self, ShareError> {
        let controller = Controller::from_config(config)?;
        Self::bind(config, controller).await
    }

    /// Binds with an already built controller.
    pub async fn bind(config: &ServerConfig, controller: Controller) -> Result<Self, ShareError> {
        controller.storage().ensure_layout().await?;
        info!(
            "Upload root: {}",
            controller.storage().layout().root().display()
        );

        let addr = config.socket_addr();
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Failed to bind to {}: {}", addr, e);
                return Err(e.into());
            }
        };

        let state = AppState::new(
            controller,
            SessionRegistry::new(config.session_ttl()),
        );
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until Ctrl-C.
    pub async fn start(self) -> Result<(), ShareError> {
        let addr = self.local_addr()?;
        log_listening(&addr);

        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
