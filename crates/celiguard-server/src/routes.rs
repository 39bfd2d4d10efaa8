//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use uuid::Uuid;

use celiguard_core::{DiagnosisRequest, Error, RiskAssessment};
use celiguard_scan::lookup;

use crate::state::AppState;

/// Fixed confidence reported for barcode-path scans (documented, not computed)
const BARCODE_CONFIDENCE: f64 = 0.95;

/// Fixed confidence reported for text/image-path scans (documented, not computed)
const TEXT_CONFIDENCE: f64 = 0.85;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/diagnosis", post(diagnose))
        .route("/scan", post(scan))
        .fallback(fallback)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

async fn fallback() -> ApiError {
    ApiError::InvalidRequest("no such endpoint".to_string())
}

/// Risk scoring: assemble, classify, tier
async fn diagnose(
    State(state): State<AppState>,
    Json(request): Json<DiagnosisRequest>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let request_id = Uuid::new_v4();
    metrics::counter!(celiguard_telemetry::REQUESTS_TOTAL, "endpoint" => "diagnosis").increment(1);
    state.metrics.record_risk_request();

    let Some(bundle) = state.bundle.current() else {
        state.metrics.record_failure();
        return Err(ApiError::ModelUnavailable);
    };

    let start = std::time::Instant::now();
    let assessment = bundle.score(&request).map_err(|e| {
        state.metrics.record_failure();
        ApiError::from(e)
    })?;
    metrics::histogram!(celiguard_telemetry::INFERENCE_LATENCY_US)
        .record(start.elapsed().as_micros() as f64);

    info!(
        %request_id,
        risk_level = %assessment.risk_level,
        risk_percentage = assessment.risk_percentage,
        "risk assessment complete"
    );
    Ok(Json(assessment))
}

/// Ingredient scan request: exactly one of barcode, image, or text
#[derive(Debug, Deserialize)]
struct ScanRequest {
    #[serde(default)]
    barcode: Option<String>,

    #[serde(default)]
    text: Option<String>,

    /// Base64-encoded image handed to the external OCR engine
    #[serde(default)]
    image: Option<String>,

    /// Optional hint; matching itself does not need it
    #[serde(default)]
    #[allow(dead_code)]
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScanResponse {
    contains_gluten: bool,
    matched_terms: Vec<String>,
    verdict_text: String,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_name: Option<String>,
}

async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    metrics::counter!(celiguard_telemetry::REQUESTS_TOTAL, "endpoint" => "scan").increment(1);
    state.metrics.record_scan_request();

    let non_empty = |s: &&str| !s.trim().is_empty();
    let response = if let Some(barcode) = request.barcode.as_deref().filter(non_empty) {
        scan_barcode(&state, barcode).await
    } else if let Some(image) = request.image.as_deref().filter(non_empty) {
        scan_image(&state, image).await.map_err(|e| {
            state.metrics.record_failure();
            e
        })?
    } else if let Some(text) = request.text.as_deref().filter(non_empty) {
        scan_text(&state, text, None)
    } else {
        state.metrics.record_failure();
        return Err(ApiError::InvalidRequest(
            "provide a barcode, ingredient text, or image".to_string(),
        ));
    };

    if response.contains_gluten {
        state.metrics.record_gluten_verdict();
    }
    let outcome = if response.contains_gluten { "gluten" } else { "clean" };
    metrics::counter!(celiguard_telemetry::SCAN_VERDICTS_TOTAL, "outcome" => outcome).increment(1);

    info!(
        %request_id,
        contains_gluten = response.contains_gluten,
        matches = response.matched_terms.len(),
        "ingredient scan complete"
    );
    Ok(Json(response))
}

/// Barcode path: real product lookup when configured, conservative
/// "unverified means unsafe" verdict otherwise
async fn scan_barcode(state: &AppState, barcode: &str) -> ScanResponse {
    if let Some(lookup_client) = &state.barcode_lookup {
        match lookup_client.lookup(barcode).await {
            Ok(product) => {
                let result = state.analyzer.analyze(&product.ingredients_text);
                return ScanResponse {
                    contains_gluten: result.contains_gluten,
                    matched_terms: result.matched_terms,
                    verdict_text: result.verdict_text,
                    confidence: BARCODE_CONFIDENCE,
                    product_name: product
                        .name
                        .or_else(|| Some(format!("Barcode product {barcode}"))),
                };
            }
            Err(e) => {
                warn!(error = %e, barcode, "barcode lookup failed; returning conservative verdict");
            }
        }
    }

    let result = lookup::unverified_product_result();
    ScanResponse {
        contains_gluten: result.contains_gluten,
        matched_terms: result.matched_terms,
        verdict_text: result.verdict_text,
        confidence: BARCODE_CONFIDENCE,
        product_name: Some(format!("Barcode product {barcode}")),
    }
}

/// Image path: await the external OCR engine once, then analyze its text
async fn scan_image(state: &AppState, image_base64: &str) -> Result<ScanResponse, ApiError> {
    let Some(extractor) = &state.text_extractor else {
        return Err(ApiError::External(
            "no text extraction engine configured".to_string(),
        ));
    };

    let text = extractor.extract(image_base64).await?;
    Ok(scan_text(
        state,
        &text,
        Some("Image-scanned product".to_string()),
    ))
}

fn scan_text(state: &AppState, text: &str, product_name: Option<String>) -> ScanResponse {
    let result = state.analyzer.analyze(text);
    ScanResponse {
        contains_gluten: result.contains_gluten,
        matched_terms: result.matched_terms,
        verdict_text: result.verdict_text,
        confidence: TEXT_CONFIDENCE,
        product_name,
    }
}

/// Error surface for all handlers
#[derive(Debug)]
pub enum ApiError {
    ModelUnavailable,
    InvalidRequest(String),
    SchemaMismatch(String),
    Config(String),
    External(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::ModelUnavailable => Self::ModelUnavailable,
            Error::InvalidRequest(msg) => Self::InvalidRequest(msg),
            Error::SchemaMismatch(msg) => Self::SchemaMismatch(msg),
            Error::Config(msg) => Self::Config(msg),
            Error::External(msg) => Self::External(msg),
            Error::Io(e) => Self::Internal(e.to_string()),
            Error::Serialization(e) => Self::Internal(e.to_string()),
        }
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::ModelUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable"),
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::SchemaMismatch(_) => (StatusCode::INTERNAL_SERVER_ERROR, "schema_mismatch"),
            Self::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
            Self::External(_) => (StatusCode::BAD_GATEWAY, "external_error"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Client-facing message, derived from the error kind; internal
    /// details stay in the logs
    fn message(&self) -> String {
        match self {
            Self::ModelUnavailable => "model unavailable".to_string(),
            Self::InvalidRequest(msg) => msg.clone(),
            Self::SchemaMismatch(_) => {
                "assembled features did not match the model schema".to_string()
            }
            Self::Config(_) => "service is misconfigured".to_string(),
            Self::External(_) => "an external service failed".to_string(),
            Self::Internal(_) => "internal error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        metrics::counter!(celiguard_telemetry::ERRORS_TOTAL, "kind" => kind).increment(1);

        if !matches!(self, Self::InvalidRequest(_)) {
            warn!(kind, detail = ?self, "request failed");
        }

        let body = json!({
            "error": {
                "status": kind,
                "message": self.message(),
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::ModelUnavailable.status_and_kind().0,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::InvalidRequest("x".into()).status_and_kind().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::External("x".into()).status_and_kind().0,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::SchemaMismatch("x".into()).status_and_kind().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_errors_map_to_kinds() {
        let api = ApiError::from(Error::ModelUnavailable);
        assert!(matches!(api, ApiError::ModelUnavailable));

        let api = ApiError::from(Error::schema_mismatch("bad width"));
        assert!(matches!(api, ApiError::SchemaMismatch(_)));

        let api = ApiError::from(Error::external("ocr down"));
        assert!(matches!(api, ApiError::External(_)));
    }

    #[test]
    fn test_internal_messages_do_not_leak_details() {
        let api = ApiError::Internal("sensitive path /opt/models".to_string());
        assert_eq!(api.message(), "internal error");

        let api = ApiError::SchemaMismatch("expected 14, got 3".to_string());
        assert!(!api.message().contains("14"));
    }
}
