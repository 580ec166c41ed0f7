//! # make_core
//!
//! Core domain logic for the Make MCP server.
//!
//! - [`client`] — authenticated access to the Make REST API
//! - [`models`] — scenario summaries and the recursive interface field model
//! - [`schema`] — translation of scenario interfaces into JSON Schema
//! - [`error`] — [`MakeError`], the normalised remote failure

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod schema;

pub use client::{MakeClient, ResponseBody, ScenarioApi};
pub use config::MakeConfig;
pub use error::MakeError;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
