//! HTTP API
//!
//! Routes under `/api/calculator` run the projection engine and attach the
//! matching insight. Saved forecasts are scoped by the `x-user-id` header set
//! by whatever fronts this service; identity itself is not checked here.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::core::{DomainError, calculate_retirement};
use crate::report::{calculation_report, estimation_report, scenario_report};

pub mod forecasts;
pub mod validate;

#[cfg(test)]
mod tests;

use forecasts::{ForecastError, ForecastId, ForecastStore};
use validate::{
    CalculatorPayload, ValidationError, validate_calculation, validate_contribution,
    validate_forecast_name, validate_scenario,
};

pub const OWNER_HEADER: &str = "x-user-id";

#[derive(Clone, Default)]
pub struct AppState {
    pub forecasts: Arc<ForecastStore>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Missing x-user-id header")]
    MissingOwner,

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Forecast(ForecastError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Forecast(ForecastError::Forbidden) => StatusCode::FORBIDDEN,
            ApiError::MissingOwner => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Domain(err) = &self {
            warn!(error = %err, "Projection rejected input");
        }
        error_response(self.status(), &self.to_string())
    }
}

#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    message: &'static str,
    timestamp: String,
}

pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let calculator_routes = Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/estimate", post(estimate_handler))
        .route("/scenario", post(scenario_handler))
        .route("/save-forecast", post(save_forecast_handler))
        .route("/forecasts", get(list_forecasts_handler))
        .route(
            "/forecasts/:forecast_id",
            get(get_forecast_handler).delete(delete_forecast_handler),
        );

    let app = Router::new()
        .route("/api/health", get(health_handler))
        .nest("/api/calculator", calculator_routes)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(&config.cors_origin) {
        Some(cors) => app.layer(cors),
        None => {
            warn!(origin = %config.cors_origin, "Invalid CORS origin, CORS disabled");
            app
        }
    }
}

/// `*` allows any origin without credentials. Any other value must be a
/// single exact origin, which is allowed with credentials.
fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(OWNER_HEADER)]);

    if origin.trim() == "*" {
        return Some(cors.allow_origin(AllowOrigin::any()));
    }
    let origin = origin.parse::<HeaderValue>().ok()?;
    Some(cors.allow_origin(origin).allow_credentials(true))
}

/// Binds the listener, moving to the next port while the current one is in
/// use, up to `config.port_retries` times.
async fn bind_with_retries(config: &ServerConfig) -> std::io::Result<TcpListener> {
    let mut port = config.port;
    let mut attempt = 0;
    loop {
        let addr: SocketAddr = (config.host, port).into();
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse && attempt < config.port_retries => {
                let next = port.checked_add(1).ok_or(e)?;
                warn!("Port {port} is already in use. Retrying on port {next}...");
                port = next;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn run_http_server(config: ServerConfig) -> std::io::Result<()> {
    let app = create_router(AppState::default(), &config);
    let listener = bind_with_retries(&config).await?;
    let addr = listener.local_addr()?;
    info!("RetireWise API listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            success: true,
            message: "Server is running",
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

async fn calculate_handler(
    payload: Result<Json<CalculatorPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let input = validate_calculation(&payload)?;
    let report = calculation_report(&input)?;
    debug!(
        years = report.projection.years_to_retirement,
        corpus = report.projection.total_retirement_corpus,
        "Calculated retirement projection"
    );
    Ok(success_response(
        StatusCode::OK,
        "Calculation completed successfully",
        report,
    ))
}

async fn estimate_handler(
    payload: Result<Json<CalculatorPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let request = validate_contribution(&payload)?;
    let report = estimation_report(&request)?;
    debug!(
        required = report.required_monthly_contribution,
        "Estimated required contribution"
    );
    Ok(success_response(
        StatusCode::OK,
        "Contribution estimation completed",
        report,
    ))
}

async fn scenario_handler(
    payload: Result<Json<CalculatorPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let input = validate_scenario(&payload)?;
    let report = scenario_report(&input)?;
    Ok(success_response(
        StatusCode::OK,
        "Scenario comparison completed",
        report,
    ))
}

fn owner_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(OWNER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingOwner)
}

async fn save_forecast_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CalculatorPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let owner = owner_from_headers(&headers)?;
    let Json(payload) = payload?;
    let name = validate_forecast_name(&payload)?;
    let input = validate_calculation(&payload)?;
    let projection = calculate_retirement(&input)?;

    let forecast = state.forecasts.save(&owner, name, input, &projection);
    info!(id = forecast.id, "Saved forecast");
    Ok(success_response(
        StatusCode::CREATED,
        "Forecast saved successfully",
        forecast,
    ))
}

async fn list_forecasts_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let owner = owner_from_headers(&headers)?;
    Ok(data_response(state.forecasts.list(&owner)))
}

async fn get_forecast_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    forecast_id: Result<Path<ForecastId>, PathRejection>,
) -> Result<Response, ApiError> {
    let owner = owner_from_headers(&headers)?;
    let Path(forecast_id) = forecast_id?;
    Ok(data_response(state.forecasts.get(forecast_id, &owner)?))
}

async fn delete_forecast_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    forecast_id: Result<Path<ForecastId>, PathRejection>,
) -> Result<Response, ApiError> {
    let owner = owner_from_headers(&headers)?;
    let Path(forecast_id) = forecast_id?;
    state.forecasts.delete(forecast_id, &owner)?;
    info!(id = forecast_id, "Deleted forecast");
    Ok(json_response(
        StatusCode::OK,
        Envelope::<()> {
            success: true,
            message: Some("Forecast deleted successfully".to_string()),
            data: None,
        },
    ))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn success_response<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    json_response(
        status,
        Envelope {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        },
    )
}

fn data_response<T: Serialize>(data: T) -> Response {
    json_response(
        StatusCode::OK,
        Envelope {
            success: true,
            message: None,
            data: Some(data),
        },
    )
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        Envelope::<()> {
            success: false,
            message: Some(msg.to_string()),
            data: None,
        },
    )
}
