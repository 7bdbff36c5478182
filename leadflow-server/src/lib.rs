//! leadflow-server library interface
//!
//! Exposes the router, application state, and service modules for
//! integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::nationalize::NationalizeClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Client for the nationality-prediction API
    pub nationalize: Arc<NationalizeClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, nationalize: Arc<NationalizeClient>) -> Self {
        Self { db, nationalize }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/leads/process", post(api::leads::process_batch))
        .route("/api/leads/all", get(api::leads::list_leads))
        .route("/api/leads/stats", get(api::leads::lead_stats))
        .merge(api::health::health_routes())
        .with_state(state)
}
