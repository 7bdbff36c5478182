//! Lead processing and query endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use leadflow_common::db::models::{Lead, LeadStatus};

use crate::db::{self, LeadCounts};
use crate::error::{ApiError, ApiResult};
use crate::services::enrichment;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<Lead>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Lead>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: LeadCounts,
}

/// POST /api/leads/process
///
/// The payload is taken as raw JSON so a missing or malformed `names`
/// field reports the documented 400 instead of an extractor rejection.
pub async fn process_batch(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    let names = match payload.get("names").and_then(Value::as_array) {
        Some(names) if !names.is_empty() => names,
        _ => {
            return Err(ApiError::BadRequest(
                "Please provide an array of names".to_string(),
            ))
        }
    };

    // Drop anything that is not a non-blank string
    let valid_names: Vec<String> = names
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if valid_names.is_empty() {
        return Err(ApiError::BadRequest("No valid names provided".to_string()));
    }

    let drafts = enrichment::enrich_batch(&state.nationalize, &valid_names).await;
    let saved = db::insert_leads(&state.db, &drafts).await?;

    info!(count = saved.len(), "processed lead batch");

    Ok((
        StatusCode::CREATED,
        Json(ProcessResponse {
            success: true,
            message: format!("Successfully processed {} leads", saved.len()),
            data: saved,
        }),
    ))
}

/// GET /api/leads/all
///
/// Optional `status` filter; unrecognized values are ignored rather than
/// rejected, so the listing falls back to unfiltered.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse>> {
    let status = query.status.as_deref().and_then(LeadStatus::parse);
    let leads = db::list_leads(&state.db, status).await?;

    Ok(Json(ListResponse {
        success: true,
        count: leads.len(),
        data: leads,
    }))
}

/// GET /api/leads/stats
pub async fn lead_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let counts = db::lead_stats(&state.db).await?;

    Ok(Json(StatsResponse {
        success: true,
        data: counts,
    }))
}
