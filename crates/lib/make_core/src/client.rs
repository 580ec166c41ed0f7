// @awa-component: MAKE-RemoteClient
//
//! Make REST API client.
//!
//! Every call is a single authenticated HTTP request against
//! `https://<zone>/api/v<version>`. Responses with status >= 400 become a
//! [`MakeError`]; JSON bodies are decoded, anything else is returned as text.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::MakeConfig;
use crate::error::MakeError;
use crate::models::{
    InterfaceResponse, RunResult, ScenarioInterface, ScenarioSummary, ScenariosResponse,
};

const USER_AGENT: &str = concat!("MakeMCPServer/", env!("CARGO_PKG_VERSION"));

/// Page size requested from the scenario listing endpoints.
const SCENARIO_PAGE_LIMIT: u32 = 1000;

/// The scenario operations the MCP layer depends on.
#[async_trait]
pub trait ScenarioApi: Send + Sync {
    /// Scenarios of a team.
    async fn list_scenarios(&self, team_id: u64) -> Result<Vec<ScenarioSummary>, MakeError>;

    /// Scenarios across an organization.
    async fn list_organization_scenarios(
        &self,
        organization_id: u64,
    ) -> Result<Vec<ScenarioSummary>, MakeError>;

    /// Declared inputs of a scenario.
    async fn scenario_interface(&self, scenario_id: u64) -> Result<ScenarioInterface, MakeError>;

    /// Run a scenario and wait for its outputs. `None` sends no `data`.
    async fn run_scenario(
        &self,
        scenario_id: u64,
        arguments: Option<Value>,
    ) -> Result<RunResult, MakeError>;
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

#[derive(Serialize)]
struct RunRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    responsive: bool,
}

/// HTTP client for the Make API.
#[derive(Clone)]
pub struct MakeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl MakeClient {
    pub fn new(config: &MakeConfig) -> Result<Self, MakeError> {
        Self::with_base_url(config.api_key.clone(), &config.base_url())
    }

    /// Client rooted at an explicit base URL (e.g. `http://127.0.0.1:8080/api/v2`).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, MakeError> {
        Url::parse(base_url)
            .map_err(|e| MakeError::new(format!("Invalid base URL {base_url}: {e}"), None))?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request path.
    ///
    /// `/path` is relative to the base URL, `//host/path` is always fetched
    /// over `https`, and anything else is used as-is.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("//") {
            format!("https:{path}")
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            path.to_string()
        }
    }

    /// Issue an authenticated request and decode the response body.
    pub async fn fetch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ResponseBody, MakeError> {
        let url = self.resolve_url(path);
        debug!(%method, %url, "Make API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, format!("Token {}", self.api_key));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            let err = MakeError::from_response_body(status, &body);
            warn!(status = status.as_u16(), %url, "Make API request failed: {err}");
            return Err(err);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        if is_json {
            let bytes = response.bytes().await?;
            Ok(ResponseBody::Json(serde_json::from_slice(&bytes)?))
        } else {
            Ok(ResponseBody::Text(response.text().await?))
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, MakeError> {
        match self.fetch(method, path, body).await? {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Text(_) => Err(MakeError::new(
                format!("Expected a JSON response from {path}"),
                None,
            )),
        }
    }
}

#[async_trait]
impl ScenarioApi for MakeClient {
    async fn list_scenarios(&self, team_id: u64) -> Result<Vec<ScenarioSummary>, MakeError> {
        let path = format!("/scenarios?teamId={team_id}&pg[limit]={SCENARIO_PAGE_LIMIT}");
        let response: ScenariosResponse = self.fetch_json(Method::GET, &path, None).await?;
        Ok(response.scenarios)
    }

    async fn list_organization_scenarios(
        &self,
        organization_id: u64,
    ) -> Result<Vec<ScenarioSummary>, MakeError> {
        let path =
            format!("/scenarios?organizationId={organization_id}&pg[limit]={SCENARIO_PAGE_LIMIT}");
        let response: ScenariosResponse = self.fetch_json(Method::GET, &path, None).await?;
        Ok(response.scenarios)
    }

    async fn scenario_interface(&self, scenario_id: u64) -> Result<ScenarioInterface, MakeError> {
        let path = format!("/scenarios/{scenario_id}/interface");
        let response: InterfaceResponse = self.fetch_json(Method::GET, &path, None).await?;
        Ok(response.interface)
    }

    async fn run_scenario(
        &self,
        scenario_id: u64,
        arguments: Option<Value>,
    ) -> Result<RunResult, MakeError> {
        let path = format!("/scenarios/{scenario_id}/run");
        let body = serde_json::to_value(RunRequest {
            data: arguments.as_ref(),
            responsive: true,
        })?;
        self.fetch_json(Method::POST, &path, Some(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MakeClient {
        MakeClient::new(&MakeConfig::new("api-key", "make.local")).expect("client")
    }

    #[test]
    fn relative_paths_resolve_against_zone() {
        assert_eq!(
            client().resolve_url("/scenarios/1/interface"),
            "https://make.local/api/v2/scenarios/1/interface"
        );
    }

    #[test]
    fn scheme_relative_paths_get_https() {
        assert_eq!(
            client().resolve_url("//eu2.make.com/api/v2/users/me"),
            "https://eu2.make.com/api/v2/users/me"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            client().resolve_url("https://hook.eu1.make.com/abc"),
            "https://hook.eu1.make.com/abc"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let client = MakeClient::with_base_url("k", "http://127.0.0.1:9/api/v2/").expect("client");
        assert_eq!(client.base_url(), "http://127.0.0.1:9/api/v2");
        assert_eq!(
            client.resolve_url("/scenarios"),
            "http://127.0.0.1:9/api/v2/scenarios"
        );
    }

    #[test]
    fn scheme_relative_paths_ignore_base_url_scheme() {
        let client = MakeClient::with_base_url("k", "http://127.0.0.1:9/api/v2").expect("client");
        assert_eq!(
            client.resolve_url("//eu2.make.com/api/v2/users/me"),
            "https://eu2.make.com/api/v2/users/me"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(MakeClient::with_base_url("k", "not a url").is_err());
    }

    #[test]
    fn run_request_omits_missing_data() {
        let body = serde_json::to_value(RunRequest {
            data: None,
            responsive: true,
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({"responsive": true}));

        let data = serde_json::json!({"number": 1});
        let body = serde_json::to_value(RunRequest {
            data: Some(&data),
            responsive: true,
        })
        .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({"data": {"number": 1}, "responsive": true})
        );
    }
}
