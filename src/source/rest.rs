//! Live data source over the hosted database's REST endpoint.
//!
//! Requests follow the PostgREST dialect the backend exposes:
//!
//! ```text
//! GET {url}/rest/v1/case_studies?select=*&is_active=eq.true&order=order_index.asc
//! apikey: {anon_key}
//! Authorization: Bearer {anon_key}
//! ```
//!
//! The anon key is public by design of the backend; row visibility is enforced
//! server-side by its access policies, which this client treats as opaque.

use super::{DataSource, SourceError};
use crate::query::Query;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestClient {
    pub fn new(url: &str, anon_key: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Full request URL for a query.
    pub fn request_url(&self, query: &Query) -> String {
        format!(
            "{}/rest/v1/{}?{}",
            self.base_url,
            query.collection.table(),
            query.to_query_string()
        )
    }

    /// Timeouts and unreachable hosts become [`SourceError::Unavailable`];
    /// other transport failures stay [`SourceError::Http`].
    fn send_error(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Unavailable("network timeout".to_string())
        } else if err.is_connect() {
            SourceError::Unavailable(format!("cannot reach {}", self.base_url))
        } else {
            SourceError::Http(err)
        }
    }
}

#[async_trait]
impl DataSource for RestClient {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, SourceError> {
        let url = self.request_url(query);
        debug!(%url, "querying backend");
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| self.send_error(err))?;
        let resp = check_response(resp).await?;
        let body: Value = resp.json().await?;
        rows_from_body(body)
    }

    fn describe(&self) -> String {
        format!("live {}", self.base_url)
    }
}

/// Map non-success statuses to [`SourceError::Api`].
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(SourceError::Api {
        status,
        message: api_message(&body),
    })
}

/// Pull the `message` field out of a backend error body, or return the body.
fn api_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn rows_from_body(body: Value) -> Result<Vec<Value>, SourceError> {
    match body {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Err(SourceError::Parse(format!(
            "expected an array of rows, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
