//! SketchSync relay server binary.

use sketchsync_server::{DEFAULT_PORT, ServerState, serve};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sketchsync_server=info".into()),
        )
        .init();

    let port = std::env::var("SKETCHSYNC_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind listen socket");
            std::process::exit(1);
        }
    };
    info!("sketch relay server listening on {addr}");

    let state = Arc::new(ServerState::new());
    if let Err(e) = serve(listener, state).await {
        error!(error = %e, "accept loop failed");
        std::process::exit(1);
    }
}
