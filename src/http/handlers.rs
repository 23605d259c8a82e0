//! API endpoint handlers.
//!
//! # Responsibilities
//! - Decode dashboard requests and delegate to the store client
//! - Translate raw store replies into the dashboard's response contract
//!
//! Read replies are forwarded verbatim on success; writes collapse into a
//! flat `{"success": true}` acknowledgement.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ProxyError;
use crate::http::server::AppState;

/// Rows fetched per analytics read unless the caller asks otherwise.
fn default_limit() -> i64 {
    100
}

/// Body of a positions update from the dashboard.
#[derive(Debug, Deserialize)]
pub struct PositionsUpdate {
    /// Vacancy category whose row is updated, e.g. `"engineering"`.
    pub vacancy_category: String,
    /// Grade name to salary position mapping, stored as-is.
    pub positions: BTreeMap<String, i64>,
}

/// Query parameters accepted by the analytics read.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Acknowledgement returned for a stored positions update.
#[derive(Debug, Serialize)]
pub struct SaveAck {
    pub success: bool,
}

/// `POST /api/save_positions`
pub async fn save_positions(
    State(state): State<AppState>,
    Json(update): Json<PositionsUpdate>,
) -> Result<Json<SaveAck>, ProxyError> {
    let reply = state
        .store
        .upsert_positions(&update.vacancy_category, &update.positions)
        .await?;

    if reply.status == StatusCode::OK || reply.status == StatusCode::NO_CONTENT {
        return Ok(Json(SaveAck { success: true }));
    }

    tracing::warn!(status = %reply.status, "Supabase rejected positions update");
    Err(ProxyError::UpstreamRejection {
        status: reply.status,
        body: reply.body,
    })
}

/// `GET /api/analytics`
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, ProxyError> {
    let reply = state.store.fetch_rows(query.limit).await?;
    let parsed: Result<Value, _> = serde_json::from_str(&reply.body);

    if reply.status == StatusCode::OK {
        let rows = parsed.map_err(|_| ProxyError::InvalidUpstreamJson)?;
        return Ok(Json(rows).into_response());
    }

    // Error replies pass through with the upstream status. Non-JSON error
    // bodies are wrapped so the dashboard always receives JSON.
    tracing::warn!(status = %reply.status, "Supabase rejected analytics read");
    let body = parsed.unwrap_or_else(|_| json!({ "error": reply.body }));
    Ok((reply.status, Json(body)).into_response())
}
