//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::GetRoomStatusUseCase;

use super::{
    handler::{get_room_status, health_check},
    signal::shutdown_signal,
    state::AppState,
};

/// Room status HTTP server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(get_room_status_usecase);
/// server.run("0.0.0.0".to_string(), 9339).await?;
/// ```
pub struct Server {
    /// GetRoomStatusUseCase（ルーム状態取得のユースケース）
    get_room_status_usecase: Arc<GetRoomStatusUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `get_room_status_usecase` - UseCase for getting the configured room's status
    pub fn new(get_room_status_usecase: Arc<GetRoomStatusUseCase>) -> Self {
        Self {
            get_room_status_usecase,
        }
    }

    /// Build the router
    ///
    /// Every path other than the health check answers with the room status,
    /// for any method. All responses allow any origin.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            get_room_status_usecase: self.get_room_status_usecase.clone(),
        });

        Router::new()
            .route("/api/health", get(health_check))
            .route("/", any(get_room_status))
            .fallback(get_room_status)
            .with_state(app_state)
            .layer(CorsLayer::new().allow_origin(Any))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the HTTP server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 9339)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;

        // Start the server
        tracing::info!("Room status server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
