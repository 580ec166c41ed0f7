// @awa-component: MAKE-RemoteError
//
//! Normalised error for failed Make API calls.
//!
//! Every failure surfaced by [`crate::MakeClient`] is a [`MakeError`]: HTTP
//! error responses, transport failures and undecodable bodies alike. Its
//! `Display` form is what tool callers see when a scenario run fails.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// A failed call against the Make API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("MakeError: {message}{}", sub_error_lines(.sub_errors))]
pub struct MakeError {
    pub message: String,
    /// HTTP status of the failed response, when one was received.
    pub status_code: Option<u16>,
    /// Per-parameter messages from the body's `suberrors` array.
    pub sub_errors: Vec<String>,
}

fn sub_error_lines(sub_errors: &[String]) -> String {
    sub_errors
        .iter()
        .map(|message| format!("\n - {message}"))
        .collect()
}

impl MakeError {
    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code,
            sub_errors: Vec::new(),
        }
    }

    /// Build an error from a failed (status >= 400) response.
    ///
    /// The body is parsed as JSON when possible: `detail` is preferred over
    /// `message`, and string messages from `suberrors` entries are collected.
    /// Anything else falls back to the status reason phrase. Never fails.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let status_code = Some(status.as_u16());
        let fallback = || {
            Self::new(
                status.canonical_reason().unwrap_or("Unknown Error"),
                status_code,
            )
        };

        let Ok(Value::Object(body)) = serde_json::from_str::<Value>(body) else {
            return fallback();
        };

        let message = body
            .get("detail")
            .and_then(Value::as_str)
            .or_else(|| body.get("message").and_then(Value::as_str));
        let Some(message) = message else {
            return fallback();
        };

        let sub_errors = body
            .get("suberrors")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("message").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            message: message.to_string(),
            status_code,
            sub_errors,
        }
    }
}

impl From<reqwest::Error> for MakeError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string(), err.status().map(|s| s.as_u16()))
    }
}

impl From<serde_json::Error> for MakeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Invalid response body: {err}"), None)
    }
}
