//! Department file sharing server - Entry Point
//!
//! Serves a small web utility where department members log in, upload files to
//! their department's folder or the shared global folder, and download or
//! delete them again.

use log::{error, info};
use std::process::ExitCode;

use dept_share::error::ShareError;
use dept_share::{Server, ServerConfig};

async fn run() -> Result<(), ShareError> {
    let config = ServerConfig::load()?;
    let server = Server::new(&config).await?;
    server.start().await
}

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Launching department file sharing server...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
