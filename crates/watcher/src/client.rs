//! HTTP client for the homework status API.

use std::future::Future;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::error::FetchError;

/// Anything that can answer "what changed since `since`" with a raw JSON payload.
pub trait StatusSource {
    fn fetch(&self, since: i64) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// reqwest-backed client for the Practicum homework status endpoint.
#[derive(Debug, Clone)]
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

impl StatusSource for PracticumClient {
    async fn fetch(&self, since: i64) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::StatusCode(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        if let Some(message) = upstream_error(&payload) {
            return Err(FetchError::UpstreamError(message));
        }

        Ok(payload)
    }
}

/// Extract an upstream-reported failure from an otherwise successful response.
///
/// The API signals these with a non-null `error` and/or `code` key, optionally
/// with a `message`. Returns `None` when both are absent or null.
fn upstream_error(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;
    let reported = |key: &str| object.get(key).is_some_and(|v| !v.is_null());
    if !reported("error") && !reported("code") {
        return None;
    }

    let parts: Vec<String> = ["code", "error", "message"]
        .iter()
        .filter_map(|key| object.get(*key))
        .filter(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();

    Some(parts.join(": "))
}
