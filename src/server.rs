use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::ServerConfig;
use crate::connection;
use crate::orchestrator::Orchestrator;

// A simple identifier for each WebSocket connection.
pub type ConnectionId = u64;

/// The one orchestrator for this process. Every event takes the lock for the
/// whole of its processing.
pub type SharedState = Arc<Mutex<Orchestrator>>;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: SharedState,
    /// How often each connection is pinged. A connection that has not
    /// answered the previous ping by the next tick is closed.
    pub heartbeat_interval: Duration,
}

impl AppState {
    pub fn new(heartbeat_interval: Duration) -> Self {
        Self {
            orchestrator: Arc::new(Mutex::new(Orchestrator::new())),
            heartbeat_interval,
        }
    }
}

/// WebSocket upgrades on any path join the game; plain HTTP gets a banner.
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(connection::entry)
        .with_state(state)
}

/// Serves on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(config.heartbeat_interval());
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "HTTP+WebSocket server listening");

    serve(listener, state).await?;
    Ok(())
}
