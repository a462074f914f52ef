//! MlClient tests against an in-process mock of the ML service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::*;

/// Valid request used across the ml_client tests
pub(crate) fn sample_input() -> PredictionInput {
    PredictionInput {
        farmer_id: Some("F001".to_string()),
        state: "Maharashtra".to_string(),
        season: "kharif".to_string(),
        year: 2024,
        crop_type: "cotton".to_string(),
        land_acres: 5.0,
        irrigation_type: "borewell".to_string(),
        water_source_count: 1,
        borewell_count: 1,
        borewell_depth_ft: 250.0,
        has_canal_access: false,
        crop_count: 2,
        has_livestock: true,
        livestock_count: 3,
        owns_tractor: false,
        has_storage: false,
        kcc_score: 720,
        kcc_repayment_rate: 85.0,
        outstanding_debt_ratio: 0.3,
        has_insurance_history: true,
        rainfall_deficit_percent: 15.0,
        actual_rainfall_mm: 680.0,
        heatwave_days: 6,
        avg_temperature_c: Some(29.5),
        monsoon_reliability: 0.7,
        ndvi_score: 0.62,
        soil_moisture_percent: 34.0,
        soil_fertility_index: 0.6,
    }
}

// ============================================================================
// MOCK SERVICE
// ============================================================================

#[derive(Clone, Copy)]
enum Mode {
    Healthy,
    /// Fail the first n predict calls with `status`, then succeed
    FailFirst(usize, u16),
    /// Respond with a risk_score outside 0-100
    OutOfRange,
    /// Out-of-range risk_score for one farmer only
    OutOfRangeFor(&'static str),
    /// success=false envelope
    RemoteError,
    /// Answer correctly, but only after a delay
    Slow(Duration),
}

#[derive(Clone)]
struct Mock {
    mode: Mode,
    batch_status: u16,
    predict_calls: Arc<AtomicUsize>,
    batch_calls: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

impl Mock {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            batch_status: 200,
            predict_calls: Arc::new(AtomicUsize::new(0)),
            batch_calls: Arc::new(AtomicUsize::new(0)),
            last_body: Arc::new(Mutex::new(None)),
        }
    }

    fn with_batch_status(mut self, status: u16) -> Self {
        self.batch_status = status;
        self
    }

    fn predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }

    fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

fn model_output(farmer_id: &Value) -> Value {
    json!({
        "farmer_id": farmer_id,
        "risk_score": 72,
        "risk_category": "low",
        "category_label": "Low Risk",
        "claim_probability": 18.5,
        "confidence": "high",
        "breakdown": {
            "weather_risk": 8,
            "infrastructure": 15,
            "diversification": 14,
            "financial_health": 20
        },
        "top_risk_drivers": [{ "factor": "rainfall_deficit_percent", "impact": 0.21 }],
        "top_protective_factors": [{ "factor": "kcc_repayment_rate", "impact": 0.34 }]
    })
}

async fn predict_handler(State(mock): State<Mock>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let call = mock.predict_calls.fetch_add(1, Ordering::SeqCst);
    let farmer_id = body["farmer_id"].clone();
    *mock.last_body.lock().unwrap() = Some(body);

    if let Mode::Slow(delay) = mock.mode {
        tokio::time::sleep(delay).await;
    }

    match mock.mode {
        Mode::FailFirst(n, status) if call < n => (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({ "detail": "unavailable" })),
        ),
        Mode::OutOfRangeFor(id) if farmer_id == id => {
            let mut data = model_output(&farmer_id);
            data["risk_score"] = json!(150);
            (StatusCode::OK, Json(json!({ "success": true, "data": data })))
        }
        Mode::Healthy | Mode::FailFirst(..) | Mode::OutOfRangeFor(_) | Mode::Slow(_) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": model_output(&farmer_id) })),
        ),
        Mode::OutOfRange => {
            let mut data = model_output(&farmer_id);
            data["risk_score"] = json!(150);
            (StatusCode::OK, Json(json!({ "success": true, "data": data })))
        }
        Mode::RemoteError => (
            StatusCode::OK,
            Json(json!({ "success": false, "error": "model not loaded" })),
        ),
    }
}

async fn batch_handler(State(mock): State<Mock>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    mock.batch_calls.fetch_add(1, Ordering::SeqCst);

    if mock.batch_status != 200 {
        return (
            StatusCode::from_u16(mock.batch_status).unwrap(),
            Json(json!({ "detail": "batch failed" })),
        );
    }

    let data: Vec<Value> = body["inputs"]
        .as_array()
        .map(|inputs| inputs.iter().map(|i| model_output(&i["farmer_id"])).collect())
        .unwrap_or_default();
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "Model loaded", "model_loaded": true }))
}

async fn model_info_handler() -> Json<Value> {
    Json(json!({ "model_type": "xgboost", "version": "1.2.0" }))
}

/// Start the mock on an ephemeral port, return its base URL
async fn spawn_mock(mock: Mock) -> String {
    let app = Router::new()
        .route("/predict", post(predict_handler))
        .route("/predict/batch", post(batch_handler))
        .route("/health", get(health_handler))
        .route("/model/info", get(model_info_handler))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// URL of a port nothing listens on
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn test_client(api_url: String, max_retries: u32, enable_fallback: bool) -> MlClient {
    test_client_with_timeout(api_url, 5, max_retries, enable_fallback)
}

fn test_client_with_timeout(
    api_url: String,
    timeout_seconds: u64,
    max_retries: u32,
    enable_fallback: bool,
) -> MlClient {
    let _ = env_logger::builder().is_test(true).try_init();

    MlClient::new(MlClientConfig {
        api_url,
        timeout_seconds,
        max_retries,
        backoff_base_ms: 1,
        enable_fallback,
    })
    .unwrap()
}

// ============================================================================
// PREDICT
// ============================================================================

#[tokio::test]
async fn test_predict_success_sends_normalized_input() {
    let mock = Mock::new(Mode::Healthy);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let mut input = sample_input();
    input.season = "Kharif".to_string();
    input.crop_type = "COTTON".to_string();
    input.monsoon_reliability = 70.0;

    let prediction = client.predict(input).await.unwrap();

    assert_eq!(prediction.state, RetryState::Succeeded);
    assert_eq!(prediction.attempts, 1);
    assert_eq!(prediction.output.risk_score, 72);
    assert_eq!(prediction.output.source, PredictionSource::Model);
    assert_eq!(prediction.output.farmer_id.as_deref(), Some("F001"));

    let body = mock.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["season"], "kharif");
    assert_eq!(body["crop_type"], "cotton");
    assert_eq!(body["monsoon_reliability"], 0.7);
}

#[tokio::test]
async fn test_predict_retries_transient_errors() {
    let mock = Mock::new(Mode::FailFirst(2, 503));
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let prediction = client.predict(sample_input()).await.unwrap();

    assert_eq!(prediction.state, RetryState::Succeeded);
    assert_eq!(prediction.attempts, 3);
    assert_eq!(mock.predict_calls(), 3);
}

#[tokio::test]
async fn test_predict_falls_back_after_exhausting_retries() {
    let mock = Mock::new(Mode::FailFirst(usize::MAX, 500));
    let client = test_client(spawn_mock(mock.clone()).await, 2, true);

    let input = sample_input();
    let prediction = client.predict(input.clone()).await.unwrap();

    assert_eq!(prediction.state, RetryState::FallbackUsed);
    assert_eq!(prediction.attempts, 3);
    assert_eq!(mock.predict_calls(), 3);
    assert_eq!(prediction.output.source, PredictionSource::Fallback);
    assert_eq!(prediction.output, local_prediction(&normalize_input(input).unwrap()));
}

#[tokio::test]
async fn test_predict_without_fallback_returns_last_error() {
    let mock = Mock::new(Mode::FailFirst(usize::MAX, 500));
    let client = test_client(spawn_mock(mock.clone()).await, 1, false);

    let result = client.predict(sample_input()).await;

    assert_eq!(result, Err(MlError::Server(500)));
    assert_eq!(mock.predict_calls(), 2);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock = Mock::new(Mode::FailFirst(usize::MAX, 404));
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let prediction = client.predict(sample_input()).await.unwrap();

    assert_eq!(prediction.state, RetryState::FallbackUsed);
    assert_eq!(prediction.attempts, 1);
    assert_eq!(mock.predict_calls(), 1);
}

#[tokio::test]
async fn test_out_of_range_response_is_validation_error() {
    let mock = Mock::new(Mode::OutOfRange);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    match client.predict(sample_input()).await {
        Err(MlError::Validation(msg)) => assert!(msg.contains("risk_score")),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(mock.predict_calls(), 1);
}

#[tokio::test]
async fn test_unprocessable_entity_is_validation_error() {
    let mock = Mock::new(Mode::FailFirst(usize::MAX, 422));
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let result = client.predict(sample_input()).await;

    assert!(matches!(result, Err(MlError::Validation(_))));
    assert_eq!(mock.predict_calls(), 1);
}

#[tokio::test]
async fn test_remote_error_falls_back() {
    let mock = Mock::new(Mode::RemoteError);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let prediction = client.predict(sample_input()).await.unwrap();

    assert_eq!(prediction.state, RetryState::FallbackUsed);
    assert_eq!(mock.predict_calls(), 1);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_service() {
    let mock = Mock::new(Mode::Healthy);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let mut input = sample_input();
    input.season = "summer".to_string();

    assert!(matches!(client.predict(input).await, Err(MlError::Validation(_))));
    assert_eq!(mock.predict_calls(), 0);
}

#[tokio::test]
async fn test_slow_service_times_out_and_retries() {
    let mock = Mock::new(Mode::Slow(Duration::from_secs(3)));
    let client = test_client_with_timeout(spawn_mock(mock.clone()).await, 1, 1, false);

    let result = client.predict(sample_input()).await;

    assert!(matches!(result, Err(MlError::Timeout(_))), "got {:?}", result);
    assert_eq!(mock.predict_calls(), 2);
}

#[tokio::test]
async fn test_slow_service_falls_back_after_timeouts() {
    let mock = Mock::new(Mode::Slow(Duration::from_secs(3)));
    let client = test_client_with_timeout(spawn_mock(mock.clone()).await, 1, 1, true);

    let prediction = client.predict(sample_input()).await.unwrap();

    assert_eq!(prediction.state, RetryState::FallbackUsed);
    assert_eq!(prediction.attempts, 2);
    assert_eq!(prediction.output.source, PredictionSource::Fallback);
    assert_eq!(mock.predict_calls(), 2);
}

#[tokio::test]
async fn test_unreachable_service_uses_fallback() {
    let client = test_client(closed_port_url().await, 1, true);

    let prediction = client.predict(sample_input()).await.unwrap();

    assert_eq!(prediction.state, RetryState::FallbackUsed);
    assert_eq!(prediction.attempts, 2);
    assert_eq!(prediction.output.source, PredictionSource::Fallback);
}

// ============================================================================
// BATCH
// ============================================================================

#[tokio::test]
async fn test_batch_uses_batch_endpoint() {
    let mock = Mock::new(Mode::Healthy);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let mut second = sample_input();
    second.farmer_id = Some("F002".to_string());

    let predictions = client.predict_batch(vec![sample_input(), second]).await.unwrap();

    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[1].output.farmer_id.as_deref(), Some("F002"));
    assert!(predictions.iter().all(|p| p.state == RetryState::Succeeded));
    assert_eq!(mock.batch_calls(), 1);
    assert_eq!(mock.predict_calls(), 0);
}

#[tokio::test]
async fn test_batch_failure_degrades_to_sequential() {
    let mock = Mock::new(Mode::Healthy).with_batch_status(500);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let predictions = client
        .predict_batch(vec![sample_input(), sample_input(), sample_input()])
        .await
        .unwrap();

    assert_eq!(predictions.len(), 3);
    assert_eq!(mock.batch_calls(), 1);
    assert_eq!(mock.predict_calls(), 3);
}

fn batch_with_bad_item() -> Vec<PredictionInput> {
    let mut bad = sample_input();
    bad.farmer_id = Some("BAD".to_string());
    let mut last = sample_input();
    last.farmer_id = Some("F003".to_string());
    vec![sample_input(), bad, last]
}

#[tokio::test]
async fn test_sequential_batch_scores_bad_item_locally() {
    let mock = Mock::new(Mode::OutOfRangeFor("BAD")).with_batch_status(500);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let inputs = batch_with_bad_item();
    let predictions = client.predict_batch(inputs.clone()).await.unwrap();

    assert_eq!(predictions.len(), 3);
    assert_eq!(predictions[0].state, RetryState::Succeeded);
    assert_eq!(predictions[0].output.risk_score, 72);
    assert_eq!(predictions[1].state, RetryState::FallbackUsed);
    assert_eq!(predictions[1].attempts, 1);
    assert_eq!(predictions[1].output, local_prediction(&normalize_input(inputs[1].clone()).unwrap()));
    assert_eq!(predictions[2].state, RetryState::Succeeded);
    assert_eq!(predictions[2].output.farmer_id.as_deref(), Some("F003"));
    assert_eq!(mock.predict_calls(), 3);
}

#[tokio::test]
async fn test_sequential_batch_without_fallback_propagates() {
    let mock = Mock::new(Mode::OutOfRangeFor("BAD")).with_batch_status(500);
    let client = test_client(spawn_mock(mock.clone()).await, 3, false);

    match client.predict_batch(batch_with_bad_item()).await {
        Err(MlError::Validation(msg)) => assert!(msg.contains("risk_score")),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(mock.predict_calls(), 2);
}

#[tokio::test]
async fn test_empty_batch_makes_no_calls() {
    let mock = Mock::new(Mode::Healthy);
    let client = test_client(spawn_mock(mock.clone()).await, 3, true);

    let predictions = client.predict_batch(Vec::new()).await.unwrap();

    assert!(predictions.is_empty());
    assert_eq!(mock.batch_calls(), 0);
}

// ============================================================================
// HEALTH / MODEL INFO
// ============================================================================

#[tokio::test]
async fn test_health_check_healthy() {
    let url = spawn_mock(Mock::new(Mode::Healthy)).await;
    let client = test_client(url.clone(), 0, true);

    let health = client.health_check().await;

    assert!(health.healthy);
    assert!(health.model_loaded);
    assert_eq!(health.status, "healthy");
    assert_eq!(health.api_url, url);
}

#[tokio::test]
async fn test_health_check_unreachable() {
    let client = test_client(closed_port_url().await, 0, true);

    let health = client.health_check().await;

    assert!(!health.healthy);
    assert!(!health.model_loaded);
    assert_eq!(health.status, "unreachable");
}

#[tokio::test]
async fn test_model_info_passthrough() {
    let client = test_client(spawn_mock(Mock::new(Mode::Healthy)).await, 0, true);

    let info = client.model_info().await.unwrap();
    assert_eq!(info["model_type"], "xgboost");
}
