//! # make_mcp
//!
//! MCP (Model Context Protocol) server exposing Make scenarios as tools.
//!
//! Every on-demand scenario of the configured team becomes a
//! `run_scenario_<id>` tool whose input schema is derived from the
//! scenario's interface. The server runs over stdio or Streamable HTTP.

pub mod config;
pub mod server;
pub mod tools;

use std::sync::Arc;

use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub use config::ServerConfig;
pub use server::MakeMcpServer;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Failures while running a transport.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("MCP initialization failed: {0}")]
    Initialize(String),

    #[error("MCP service task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build an Axum router that serves the MCP Streamable HTTP endpoint at `/mcp`.
///
/// Each session gets a clone of `server`. `ct` ends open SSE streams on
/// shutdown.
pub fn mcp_router(server: MakeMcpServer, ct: CancellationToken) -> axum::Router {
    let service: StreamableHttpService<MakeMcpServer, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(server.clone()),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                stateful_mode: true,
                cancellation_token: ct,
                ..Default::default()
            },
        );

    axum::Router::new().nest_service("/mcp", service)
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: MakeMcpServer) -> Result<(), ServeError> {
    info!(team_id = server.team_id(), "serving MCP over stdio");
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServeError::Initialize(e.to_string()))?;
    let reason = running.waiting().await?;
    info!(?reason, "MCP stdio session ended");
    Ok(())
}

/// Serve MCP over Streamable HTTP on `bind_addr` until `ct` is cancelled.
pub async fn serve_http(
    server: MakeMcpServer,
    bind_addr: &str,
    ct: CancellationToken,
) -> Result<(), ServeError> {
    let team_id = server.team_id();
    let app = mcp_router(server, ct.clone());
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %listener.local_addr()?, team_id, "MCP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await?;
    Ok(())
}
