//! MCP server configuration.

use make_core::MakeConfig;

/// Configuration for the Make MCP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Make API connection settings.
    pub make: MakeConfig,
    /// Team whose on-demand scenarios become tools.
    pub team_id: u64,
}

impl ServerConfig {
    /// | Setting          | Env var (binary)  |
    /// |------------------|-------------------|
    /// | `make.api_key`   | `MAKE_API_KEY`    |
    /// | `make.zone`      | `MAKE_ZONE`       |
    /// | `team_id`        | `MAKE_TEAM`       |
    ///
    /// All three are required; the binary refuses to start without them.
    pub fn new(make: MakeConfig, team_id: u64) -> Self {
        Self { make, team_id }
    }
}
