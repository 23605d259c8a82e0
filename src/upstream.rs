//! Upstream Supabase store client.
//!
//! # Responsibilities
//! - Build the two REST calls the proxy issues (read rows, upsert positions)
//! - Attach the store's dual `apikey` / `Authorization: Bearer` headers
//! - Bound every exchange with a fixed timeout, exactly one attempt
//!
//! # Design Decisions
//! - The raw status/body pair is handed back untouched; how it maps onto
//!   the client response is the handlers' concern
//! - Exchanges run as detached tasks so a dropped caller cannot abort an
//!   in-flight upstream call
//! - No retries: the store owns all consistency guarantees

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use crate::config::StoreConfig;
use crate::error::{ProxyError, ProxyResult};

/// Fixed budget for one upstream exchange.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Upstream bodies are logged at debug level up to this many characters.
const BODY_PREVIEW_LIMIT: usize = 1000;

/// Raw upstream reply: status plus unparsed body text.
#[derive(Debug, Clone)]
pub struct StoreResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Client for the Supabase REST store.
#[derive(Clone)]
pub struct StoreClient {
    config: Arc<StoreConfig>,
    http: reqwest::Client,
}

impl StoreClient {
    /// Build a client around the immutable store configuration.
    pub fn new(config: Arc<StoreConfig>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self { config, http })
    }

    /// `GET {base}/rest/v1/{table}?select=*&limit={limit}`.
    ///
    /// The limit is forwarded verbatim; the store enforces its own bounds.
    pub async fn fetch_rows(&self, limit: i64) -> ProxyResult<StoreResponse> {
        let (endpoint, key) = self.endpoint()?;
        tracing::info!(endpoint = %endpoint, limit, "Proxying analytics read to Supabase");

        let request = self
            .http
            .get(endpoint)
            .query(&[("select", "*".to_string()), ("limit", limit.to_string())])
            .header("apikey", key)
            .bearer_auth(key)
            .header(reqwest::header::ACCEPT, "application/json");

        self.execute(request).await
    }

    /// `PATCH {base}/rest/v1/{table}?vacancy_category=eq.{category}` with
    /// the positions mapping as the new `grades_positions` value.
    ///
    /// `Prefer: resolution=merge-duplicates` makes the store update the
    /// matching row instead of inserting a duplicate.
    pub async fn upsert_positions(
        &self,
        category: &str,
        positions: &BTreeMap<String, i64>,
    ) -> ProxyResult<StoreResponse> {
        let (endpoint, key) = self.endpoint()?;
        tracing::info!(endpoint = %endpoint, category, "Updating stored positions");

        let request = self
            .http
            .patch(endpoint)
            .query(&[("vacancy_category", format!("eq.{category}"))])
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&json!({ "grades_positions": positions }));

        self.execute(request).await
    }

    fn endpoint(&self) -> ProxyResult<(String, &str)> {
        self.config.table_endpoint().ok_or_else(|| {
            tracing::warn!("Supabase URL or API key not configured; rejecting proxy call");
            ProxyError::MissingConfig
        })
    }

    /// Run one exchange to completion.
    ///
    /// Spawned so the call keeps running even when the inbound request
    /// that triggered it is dropped mid-flight. The task is never aborted,
    /// so a join failure means the exchange panicked.
    async fn execute(&self, request: reqwest::RequestBuilder) -> ProxyResult<StoreResponse> {
        let exchange = tokio::spawn(async move {
            let response = request.send().await.map_err(|err| {
                tracing::error!(error = %err, "Request to Supabase failed");
                ProxyError::transport(err)
            })?;

            let status = response.status();
            let body = response.text().await.map_err(ProxyError::transport)?;

            tracing::info!(status = %status, "Supabase responded");
            tracing::debug!(body = %preview(&body), "Supabase body preview");
            Ok(StoreResponse { status, body })
        });

        match exchange.await {
            Ok(result) => result,
            Err(err) => Err(ProxyError::Transport(format!(
                "upstream exchange failed: {err}"
            ))),
        }
    }
}

/// Truncate a body for debug logging.
fn preview(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
