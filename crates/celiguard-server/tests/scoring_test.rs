//! End-to-end tests for the celiguard HTTP surface
//!
//! Builds real artifacts in a temp directory, constructs the full app
//! state, and drives the router directly.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use celiguard_inference::{ColumnSpec, DecisionTree, FeatureSchema, ForestModel, TreeNode};
use celiguard_server::config::ServiceConfig;
use celiguard_server::routes::create_router;
use celiguard_server::state::AppState;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

fn celiac_schema() -> FeatureSchema {
    FeatureSchema::new(vec![
        ColumnSpec::numeric("Age"),
        ColumnSpec::categorical("Gender"),
        ColumnSpec::categorical("Diabetes"),
        ColumnSpec::categorical("Diabetes Type"),
        ColumnSpec::categorical("Diarrhoea"),
        ColumnSpec::categorical("Abdominal"),
        ColumnSpec::categorical("Short_Stature"),
        ColumnSpec::categorical("Sticky_Stool"),
        ColumnSpec::categorical("Weight_loss"),
        ColumnSpec::numeric("IgA"),
        ColumnSpec::numeric("IgG"),
        ColumnSpec::numeric("IgM"),
        ColumnSpec::categorical("Marsh"),
        ColumnSpec::categorical("cd_type"),
    ])
}

fn celiac_encoders() -> Value {
    json!({
        "Gender": {"classes": ["female", "male"]},
        "Diabetes": {"classes": ["no", "yes"]},
        "Diabetes Type": {"classes": ["none", "type1", "type2"]},
        "Diarrhoea": {"classes": ["fatty", "none", "watery"]},
        "Abdominal": {"classes": ["no", "yes"]},
        "Short_Stature": {"classes": ["DSS", "NSS", "PSS"]},
        "Sticky_Stool": {"classes": ["no", "yes"]},
        "Weight_loss": {"classes": ["no", "yes"]},
        "Marsh": {"classes": ["none", "type1", "type2", "type3a", "type3b"]},
        "cd_type": {"classes": ["atypical", "none", "silent", "typical"]},
    })
}

fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> DecisionTree {
    DecisionTree {
        root: TreeNode::Split {
            feature,
            threshold,
            left: Box::new(TreeNode::Leaf { value: low }),
            right: Box::new(TreeNode::Leaf { value: high }),
        },
    }
}

fn celiac_model() -> ForestModel {
    ForestModel {
        n_features: 14,
        trees: vec![
            stump(9, 100.0, 0.9, 0.3),
            stump(12, 1.5, 0.2, 0.8),
            stump(13, 0.5, 0.1, 0.7),
        ],
    }
}

/// Write both artifacts and return a state serving them
fn app_state(dir: &tempfile::TempDir) -> AppState {
    let encoders_path = dir.path().join("feature_encoders.json");
    let artifact = json!({
        "schema": celiac_schema(),
        "encoders": celiac_encoders(),
    });
    std::fs::write(&encoders_path, artifact.to_string()).unwrap();

    let model_path = dir.path().join("celiac_model.json");
    std::fs::write(&model_path, serde_json::to_string(&celiac_model()).unwrap()).unwrap();

    let config = ServiceConfig {
        model_path: model_path.to_string_lossy().into_owned(),
        encoders_path: encoders_path.to_string_lossy().into_owned(),
        ..ServiceConfig::default()
    };

    let handle = PrometheusBuilder::new().build_recorder().handle();
    AppState::new(config, handle).unwrap()
}

fn degraded_state() -> AppState {
    let config = ServiceConfig {
        model_path: "/nonexistent/model.json".to_string(),
        encoders_path: "/nonexistent/encoders.json".to_string(),
        ..ServiceConfig::default()
    };
    let handle = PrometheusBuilder::new().build_recorder().handle();
    AppState::new(config, handle).unwrap()
}

fn sample_diagnosis() -> Value {
    json!({
        "age": 35, "gender": "male", "diabetes": "yes", "diabetes_type": "type2",
        "diarrhoea": "watery", "abdominal": "yes", "short_stature": "NSS",
        "sticky_stool": "no", "weight_loss": "no", "iga": 90, "igg": 1100,
        "igm": 100, "marsh": "type2", "cd_type": "typical"
    })
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_diagnosis_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(app_state(&dir));

    let (status, body) = post_json(app, "/diagnosis", sample_diagnosis()).await;
    assert_eq!(status, StatusCode::OK);

    // IgA 90 -> 0.9, Marsh type2 -> 0.8, typical cd_type -> 0.7; mean 0.8
    assert_eq!(body["risk_percentage"], 80.0);
    assert_eq!(body["risk_level"], "High Risk");
    let confidence = body["model_confidence"].as_f64().unwrap();
    assert!((confidence - 0.8).abs() < 1e-9);
    assert!(!body["description"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_diagnosis_tier_matches_percentage() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(app_state(&dir));

    let (_, body) = post_json(app, "/diagnosis", sample_diagnosis()).await;
    let pct = body["risk_percentage"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&pct));

    let expected = if pct > 75.0 {
        "High Risk"
    } else if pct > 50.0 {
        "Moderate Risk"
    } else if pct > 25.0 {
        "Low Risk"
    } else {
        "Very Low Risk"
    };
    assert_eq!(body["risk_level"], expected);
}

#[tokio::test]
async fn test_diagnosis_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let state = app_state(&dir);

    let (_, first) = post_json(create_router(state.clone()), "/diagnosis", sample_diagnosis()).await;
    let (_, second) =
        post_json(create_router(state), "/diagnosis", sample_diagnosis()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unseen_category_does_not_fail() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(app_state(&dir));

    let mut request = sample_diagnosis();
    request["gender"] = json!("unknown-label");
    let (status, body) = post_json(app, "/diagnosis", request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["risk_percentage"].is_number());
}

#[tokio::test]
async fn test_degraded_service_fails_fast_but_scan_survives() {
    let state = degraded_state();

    let (status, body) = post_json(
        create_router(state.clone()),
        "/diagnosis",
        sample_diagnosis(),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["status"], "model_unavailable");

    // Ingredient scanning remains available
    let (status, body) = post_json(
        create_router(state),
        "/scan",
        json!({"text": "rice and corn only"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contains_gluten"], false);
}

#[tokio::test]
async fn test_scan_text_path() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(app_state(&dir));

    let (status, body) = post_json(
        app,
        "/scan",
        json!({"text": "this product contains wheat flour"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contains_gluten"], true);
    assert_eq!(body["confidence"], 0.85);
    let matched: Vec<String> =
        serde_json::from_value(body["matched_terms"].clone()).unwrap();
    assert!(matched.contains(&"wheat".to_string()));
}

#[tokio::test]
async fn test_scan_barcode_without_lookup_is_conservative() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(app_state(&dir));

    let (status, body) = post_json(app, "/scan", json!({"barcode": "6291001234567"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contains_gluten"], true);
    assert_eq!(body["confidence"], 0.95);
    assert!(body["product_name"].as_str().unwrap().contains("6291001234567"));
}

#[tokio::test]
async fn test_scan_rejects_empty_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(app_state(&dir));

    let (status, body) = post_json(app, "/scan", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], "invalid_request");
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(app_state(&dir));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
