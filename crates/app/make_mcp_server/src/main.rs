//! Make MCP server binary.
//!
//! Exposes the on-demand scenarios of a Make team as MCP tools, over stdio
//! (default) or Streamable HTTP.

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::info;

use make_core::MakeConfig;
use make_mcp::{MakeMcpServer, ServerConfig};

/// Transport the MCP server speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// Streamable HTTP at `/mcp`.
    Http,
}

/// CLI arguments for the Make MCP server.
#[derive(Parser, Debug)]
#[command(name = "make_mcp_server", version, about = "Make scenarios as MCP tools")]
struct Args {
    /// Make API token.
    #[arg(long, env = "MAKE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Make zone hostname (e.g. eu1.make.com).
    #[arg(long, env = "MAKE_ZONE")]
    zone: String,

    /// Team whose on-demand scenarios are exposed.
    #[arg(long = "team", env = "MAKE_TEAM")]
    team_id: u64,

    /// Make API version.
    #[arg(long, env = "MAKE_API_VERSION", default_value_t = make_core::config::DEFAULT_API_VERSION)]
    api_version: u32,

    /// MCP transport.
    #[arg(long, env = "MAKE_MCP_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Listen address for the HTTP transport.
    #[arg(long, env = "MAKE_MCP_BIND", default_value = "127.0.0.1:3100")]
    bind: String,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        ServerConfig::new(
            MakeConfig::new(self.api_key.clone(), self.zone.clone())
                .with_api_version(self.api_version),
            self.team_id,
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the stdio MCP stream.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,make_core=debug,make_mcp=debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.server_config();

    info!(
        zone = %config.make.zone,
        team_id = config.team_id,
        transport = ?args.transport,
        "starting make_mcp_server"
    );

    let server = MakeMcpServer::from_config(&config)?;

    match args.transport {
        Transport::Stdio => make_mcp::serve_stdio(server).await?,
        Transport::Http => {
            let ct = CancellationToken::new();
            tokio::spawn({
                let ct = ct.clone();
                async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("shutdown signal received");
                    }
                    ct.cancel();
                }
            });
            make_mcp::serve_http(server, &args.bind, ct).await?;
        }
    }

    Ok(())
}
