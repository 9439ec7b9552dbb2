//! HTTP request boundary: decodes requests, hands them to `calc-core`'s
//! engine, and encodes responses. No business logic lives here.

use std::sync::Arc;

use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use calc_core::{AccrualRateProvider, CalculationRequest, DefaultAccrualRateProvider, EngineError};
use serde::Serialize;
use thiserror::Error;

/// Shared, cloneable application state handed to every route.
#[derive(Clone)]
pub struct ServiceState {
    pub accrual_provider: Arc<dyn AccrualRateProvider + Send + Sync>,
}

impl ServiceState {
    pub fn new(accrual_provider: Arc<dyn AccrualRateProvider + Send + Sync>) -> Self {
        Self { accrual_provider }
    }
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::new(Arc::new(DefaultAccrualRateProvider))
    }
}

pub fn build_router(state: ServiceState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/calculation-requests", post(calculation_requests))
        .with_state(state)
}

#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn calculation_requests(
    State(state): State<ServiceState>,
    AppJson(request): AppJson<CalculationRequest>,
) -> Result<Json<calc_core::CalculationResponse>, ApiError> {
    let span = tracing::info_span!(
        "calculation_request",
        tenant_id = %request.tenant_id,
        calculation_id = tracing::field::Empty,
    );
    let _guard = span.enter();

    let accrual_provider = state.accrual_provider.clone();
    let response = calc_core::evaluate_request(&request, accrual_provider.as_ref(), &|| false)?;

    span.record(
        "calculation_id",
        tracing::field::display(response.calculation_metadata.calculation_id),
    );
    tracing::info!(
        outcome = ?response.calculation_metadata.calculation_outcome,
        "calculation request completed"
    );

    Ok(Json(response))
}

/// A [`Json`] extractor that reports schema/parse failures as problem
/// details instead of axum's plaintext default.
struct AppJson<T>(T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// RFC-7807-flavored problem details body.
#[derive(Debug, Serialize)]
struct ProblemDetails {
    title: &'static str,
    status: u16,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, detail) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "Bad Request", detail.clone()),
            ApiError::Engine(err) => {
                tracing::error!(error = %err, "unexpected engine construction failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "the request could not be processed".to_string(),
                )
            }
        };
        let body = ProblemDetails {
            title,
            status: status.as_u16(),
            detail,
            errors: None,
        };
        (status, Json(body)).into_response()
    }
}
