//! HTTP front end for the Bondgate decision pipelines.
//!
//! Each pipeline is a JSON `POST` under `/api/v1/calculate/`; the Smart
//! Evaluator is also mounted at `/api/tools/smart-evaluator`. Thresholds come
//! from the `[policy]` table of the TOML config and are shared by every route.
//!
//! ```ignore
//! use bondgate_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::from_file("config/bondgate.toml")?;
//! Server::new(config).start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};

/// Owns the loaded configuration and serves the API.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Wraps an already validated configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// The configuration this server was built with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// All routes with panic recovery, request tracing and permissive CORS.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.config.policy.clone())
            .layer(CatchPanicLayer::custom(error::panic_response))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Binds `host:port` and serves until Ctrl+C, draining in-flight requests.
    pub async fn start(&self) -> std::io::Result<()> {
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address).await?;
        info!(%address, "bondgate listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(ctrl_c())
            .await
    }
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("ctrl-c received, shutting down"),
        Err(e) => {
            // Without a signal handler the server runs until killed
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}
