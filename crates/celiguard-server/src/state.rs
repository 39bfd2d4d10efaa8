//! Shared application state

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use celiguard_inference::{ArtifactBundle, ArtifactPaths, SharedBundle};
use celiguard_scan::{BarcodeLookup, GlutenAnalyzer, TextExtractor};
use celiguard_telemetry::ServiceMetrics;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

use crate::clients::{HttpBarcodeLookup, HttpTextExtractor};
use crate::config::ServiceConfig;

/// Application state shared across all requests.
///
/// Everything here is read-only per request; the artifact bundle is the
/// only member that can change over the process lifetime, and only by
/// whole-reference swap.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServiceConfig>,

    /// Current artifact bundle; empty while degraded
    pub bundle: SharedBundle,

    /// Compiled gluten keyword matcher
    pub analyzer: Arc<GlutenAnalyzer>,

    /// External product database, when configured
    pub barcode_lookup: Option<Arc<dyn BarcodeLookup>>,

    /// External OCR engine, when configured
    pub text_extractor: Option<Arc<dyn TextExtractor>>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,

    /// Process-level counters
    pub metrics: ServiceMetrics,
}

impl AppState {
    /// Initialize application state from configuration.
    ///
    /// A failed artifact load does not abort startup: the service comes up
    /// degraded, risk-scoring requests fail fast, and ingredient scanning
    /// stays available.
    pub fn new(config: ServiceConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        info!("Initializing application state");

        let paths = ArtifactPaths {
            model: PathBuf::from(&config.model_path),
            encoders: PathBuf::from(&config.encoders_path),
        };
        let bundle = match ArtifactBundle::load(&paths) {
            Ok(bundle) => {
                info!(
                    model = %config.model_path,
                    encoders = %config.encoders_path,
                    "artifact bundle ready"
                );
                SharedBundle::new(bundle)
            }
            Err(e) => {
                warn!(error = %e, "artifact bundle failed to load; risk scoring is degraded");
                SharedBundle::empty()
            }
        };

        let analyzer = GlutenAnalyzer::with_default_keywords()
            .map_err(|e| anyhow::anyhow!("failed to build gluten analyzer: {e}"))?;
        info!(keywords = analyzer.keywords().len(), "gluten analyzer ready");

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.external_timeout_secs))
            .build()?;

        let barcode_lookup: Option<Arc<dyn BarcodeLookup>> =
            config.product_lookup_url.as_ref().map(|url| {
                Arc::new(HttpBarcodeLookup::new(http_client.clone(), url.clone()))
                    as Arc<dyn BarcodeLookup>
            });

        let text_extractor: Option<Arc<dyn TextExtractor>> = config.ocr_url.as_ref().map(|url| {
            Arc::new(HttpTextExtractor::new(http_client.clone(), url.clone()))
                as Arc<dyn TextExtractor>
        });

        Ok(Self {
            config: Arc::new(config),
            bundle,
            analyzer: Arc::new(analyzer),
            barcode_lookup,
            text_extractor,
            metrics_handle,
            metrics: ServiceMetrics::new(),
        })
    }
}
