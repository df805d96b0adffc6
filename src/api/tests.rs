//! Router tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn setup_test_app() -> Router {
    create_router(AppState::default(), &ServerConfig::default())
}

async fn get_body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_owner(mut request: Request<Body>, owner: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert(OWNER_HEADER, HeaderValue::from_str(owner).unwrap());
    request
}

fn sample_body() -> Value {
    json!({
        "currentAge": 30,
        "retirementAge": 60,
        "monthlyContribution": 10000,
        "expectedReturn": 10,
        "annuityReturn": 8
    })
}

// ========== Health / fallback ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Server is running");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
    let app = setup_test_app();
    let response = app
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_body_json(response).await;
    assert_eq!(json, json!({"success": false, "message": "Route not found"}));
}

#[tokio::test]
async fn test_wildcard_cors_origin_allows_any_origin() {
    let config = ServerConfig {
        cors_origin: "*".to_string(),
        ..ServerConfig::default()
    };
    let app = create_router(AppState::default(), &config);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://planner.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none()
    );
}

#[tokio::test]
async fn test_exact_cors_origin_allows_credentials() {
    let app = setup_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

// ========== Calculator ==========

#[tokio::test]
async fn test_calculate() {
    let app = setup_test_app();
    let response = app
        .oneshot(post_json("/api/calculator/calculate", sample_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Calculation completed successfully");

    let data = &json["data"];
    assert_eq!(data["yearsToRetirement"], 30);
    assert_eq!(data["totalRetirementCorpus"], 22_604_879.25);
    assert_eq!(data["lumpSum"], 13_562_927.55);
    assert_eq!(data["annualPension"], 723_356.14);
    assert_eq!(data["monthlyPension"], 60_279.68);
    assert_eq!(data["totalContribution"], 3_600_000.0);
    assert_eq!(data["aiPrediction"]["model"], "RetireWise AI Predictor v1");
    assert_eq!(data["aiPrediction"]["riskLevel"], "Moderate");
    assert_eq!(
        data["aiPrediction"]["recommendedActions"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_calculate_validation_error() {
    let app = setup_test_app();
    let mut body = sample_body();
    body["currentAge"] = json!("abc");
    body["annuityReturn"] = json!(45);

    let response = app
        .oneshot(post_json("/api/calculator/calculate", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], false);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Current age must be a number"));
    assert!(message.contains("Annuity return must be greater than 0 and at most 30 percent"));
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn test_calculate_malformed_json() {
    let app = setup_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/calculator/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_estimate() {
    let app = setup_test_app();
    let response = app
        .oneshot(post_json(
            "/api/calculator/estimate",
            json!({
                "desiredMonthlyPension": 50000,
                "currentAge": 30,
                "retirementAge": 60,
                "expectedReturn": 10,
                "annuityReturn": 8
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["desiredMonthlyPension"], 50_000.0);
    assert_eq!(data["requiredMonthlyContribution"], 8_294.67);
    let insight = &data["aiContributionInsights"];
    assert_eq!(insight["confidenceScore"], 88);
    assert_eq!(
        insight["recommendedContributionRange"],
        json!({"lower": 7631, "target": 8295, "upper": 9290})
    );
}

#[tokio::test]
async fn test_estimate_requires_desired_pension() {
    let app = setup_test_app();
    let response = app
        .oneshot(post_json("/api/calculator/estimate", sample_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Valid desired monthly pension is required");
}

#[tokio::test]
async fn test_scenario() {
    let app = setup_test_app();
    let mut body = sample_body();
    body.as_object_mut().unwrap().remove("expectedReturn");

    let response = app
        .oneshot(post_json("/api/calculator/scenario", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["conservative"]["totalRetirementCorpus"], 14_903_594.49);
    assert_eq!(data["moderate"]["totalRetirementCorpus"], 22_604_879.25);
    assert_eq!(data["aggressive"]["totalRetirementCorpus"], 34_949_641.33);
    assert_eq!(data["aiScenarioInsights"]["confidenceScore"], 68);
    assert_eq!(data["aiScenarioInsights"]["bestScenario"], "Aggressive");
}

// ========== Forecasts ==========

#[tokio::test]
async fn test_forecasts_require_owner() {
    let app = setup_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/calculator/forecasts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_save_forecast_requires_name() {
    let app = setup_test_app();
    let response = app
        .oneshot(with_owner(
            post_json("/api/calculator/save-forecast", sample_body()),
            "alice",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Forecast name is required");
}

#[tokio::test]
async fn test_forecast_lifecycle() {
    let app = setup_test_app();
    let mut body = sample_body();
    body["forecastName"] = json!("Retire at 60");

    let response = app
        .clone()
        .oneshot(with_owner(
            post_json("/api/calculator/save-forecast", body),
            "alice",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = get_body_json(response).await;
    let id = json["data"]["id"].as_u64().unwrap();
    assert_eq!(json["data"]["forecastName"], "Retire at 60");
    assert_eq!(json["data"]["pensionAmount"], 60_279.68);
    assert!(json["data"].get("aiPrediction").is_none());

    let response = app
        .clone()
        .oneshot(with_owner(
            Request::builder()
                .uri("/api/calculator/forecasts")
                .body(Body::empty())
                .unwrap(),
            "alice",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(with_owner(
            Request::builder()
                .uri(format!("/api/calculator/forecasts/{id}"))
                .body(Body::empty())
                .unwrap(),
            "bob",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(with_owner(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/calculator/forecasts/{id}"))
                .body(Body::empty())
                .unwrap(),
            "alice",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Forecast deleted successfully");

    let response = app
        .oneshot(with_owner(
            Request::builder()
                .uri(format!("/api/calculator/forecasts/{id}"))
                .body(Body::empty())
                .unwrap(),
            "alice",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_forecast_id_returns_envelope() {
    let app = setup_test_app();
    for method in ["GET", "DELETE"] {
        let response = app
            .clone()
            .oneshot(with_owner(
                Request::builder()
                    .method(method)
                    .uri("/api/calculator/forecasts/abc")
                    .body(Body::empty())
                    .unwrap(),
                "alice",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("abc"));
    }
}

// ========== Errors ==========

#[test]
fn domain_errors_map_to_unprocessable_entity() {
    let err = ApiError::from(DomainError::NonPositiveAnnuityRate(0.0));
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        ApiError::from(ForecastError::NotFound).status(),
        StatusCode::NOT_FOUND
    );
}
