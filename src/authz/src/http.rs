//! HTTP decision service
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /metrics` - Decision counters (Prometheus text format)
//! - `POST /v1/evaluate` - One principal, one descriptor
//! - `POST /v1/evaluate/batch` - One principal, many descriptors (order preserved)
//! - `POST /v1/resources/check` - One principal, one catalog entry by id
//! - `POST /v1/navigation` - Navigation tree visible to a principal
//!
//! The principal travels in the request body exactly as the upstream
//! identity layer produced it. This service does not authenticate.

use crate::catalog::DescriptorCatalog;
use crate::engine::{AccessDecision, AccessEvaluator, DecisionMetrics, ResourceDescriptor};
use crate::error::AuthzError;
use crate::navigation::{visible_groups, VisibleGroup};
use crate::principal::{Principal, PrincipalRecord};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, Level};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<DescriptorCatalog>,
    metrics: Arc<DecisionMetrics>,
    evaluator: AccessEvaluator,
    start_time: Instant,
}

impl AppState {
    pub fn new(catalog: DescriptorCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            metrics: Arc::new(DecisionMetrics::new()),
            evaluator: AccessEvaluator::new(),
            start_time: Instant::now(),
        }
    }

    pub fn metrics(&self) -> &DecisionMetrics {
        &self.metrics
    }

    pub fn catalog(&self) -> &DescriptorCatalog {
        &self.catalog
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::ResourceNotFound(_) => AppError::NotFound(err.to_string()),
            AuthzError::InvalidInput(_)
            | AuthzError::UnknownRole(_)
            | AuthzError::UnknownDepartment(_)
            | AuthzError::UnknownModule(_)
            | AuthzError::UnknownAction(_) => AppError::BadRequest(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

// Descriptors stay raw JSON until the handler parses them; a malformed
// descriptor is a 400 like a malformed principal.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub principal: PrincipalRecord,
    pub descriptor: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub principal: PrincipalRecord,
    pub descriptors: Vec<serde_json::Value>,
}

fn parse_descriptor(value: serde_json::Value) -> Result<ResourceDescriptor, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("Invalid descriptor: {}", e)))
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub decisions: Vec<AccessDecision>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCheckRequest {
    pub principal: PrincipalRecord,
    pub resource_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCheckResponse {
    pub resource_id: String,
    #[serde(flatten)]
    pub decision: AccessDecision,
}

#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    pub principal: PrincipalRecord,
}

#[derive(Debug, Serialize)]
struct NavigationResponse<'a> {
    groups: Vec<VisibleGroup<'a>>,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    uptime_seconds: u64,
    version: String,
    catalog_entries: usize,
}

/// POST /v1/evaluate
async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<AccessDecision>, AppError> {
    let principal = Principal::try_from(req.principal)?;
    let descriptor = parse_descriptor(req.descriptor)?;
    let decision = state.evaluator.evaluate(&principal, &descriptor);
    state.metrics.record(decision);

    debug!(
        principal = principal.id(),
        role = %principal.role(),
        reason = %decision.reason(),
        "Evaluated descriptor"
    );

    Ok(Json(decision))
}

/// POST /v1/evaluate/batch
async fn evaluate_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let principal = Principal::try_from(req.principal)?;
    let descriptors = req
        .descriptors
        .into_iter()
        .map(parse_descriptor)
        .collect::<Result<Vec<_>, _>>()?;
    let decisions = state.evaluator.evaluate_list(&principal, &descriptors);
    state.metrics.record_all(&decisions);

    debug!(
        principal = principal.id(),
        count = decisions.len(),
        allowed = decisions.iter().filter(|d| d.allowed()).count(),
        "Evaluated descriptor batch"
    );

    Ok(Json(BatchResponse { decisions }))
}

/// POST /v1/resources/check
async fn check_resource(
    State(state): State<AppState>,
    Json(req): Json<ResourceCheckRequest>,
) -> Result<Json<ResourceCheckResponse>, AppError> {
    let principal = Principal::try_from(req.principal)?;
    let entry = state.catalog.require(&req.resource_id)?;
    let decision = state.evaluator.evaluate(&principal, &entry.descriptor);
    state.metrics.record(decision);

    info!(
        "Resource check: principal={}, resource={}, decision={} ({})",
        principal.id(),
        entry.id,
        if decision.allowed() { "ALLOW" } else { "DENY" },
        decision.reason()
    );

    Ok(Json(ResourceCheckResponse {
        resource_id: entry.id.clone(),
        decision,
    }))
}

/// POST /v1/navigation
async fn navigation(
    State(state): State<AppState>,
    Json(req): Json<NavigationRequest>,
) -> Result<Response, AppError> {
    let principal = Principal::try_from(req.principal)?;
    let tree = state.catalog.navigation();
    let groups = visible_groups(&principal, &tree);
    debug!(principal = principal.id(), groups = groups.len(), "Built navigation");

    Ok(Json(NavigationResponse { groups }).into_response())
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: crate::VERSION.to_string(),
        catalog_entries: state.catalog.len(),
    })
}

/// GET /metrics
async fn metrics(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4")],
        state.metrics.render_prometheus(),
    )
        .into_response()
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/v1/evaluate", post(evaluate))
        .route("/v1/evaluate/batch", post(evaluate_batch))
        .route("/v1/resources/check", post(check_resource))
        .route("/v1/navigation", post(navigation))
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
        .with_state(state)
}
