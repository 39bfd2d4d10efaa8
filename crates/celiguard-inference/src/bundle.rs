//! Artifact bundle loading and shared ownership
//!
//! The offline trainer produces two JSON artifacts: the classifier and the
//! encoder map (which carries the feature schema). Both are loaded once at
//! process start, cross-validated, and treated as read-only thereafter.
//! Replacing a bundle is a whole-reference swap, never in-place mutation,
//! so concurrent readers can never observe a partially-updated bundle.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use celiguard_core::{DiagnosisRequest, Error, Result, RiskAssessment};
use serde::Deserialize;
use tracing::info;

use crate::assembler::FeatureAssembler;
use crate::classifier::RiskClassifier;
use crate::encoder::EncoderSet;
use crate::forest::ForestModel;
use crate::schema::{ColumnKind, FeatureSchema};
use crate::tier;

/// Locations of the two artifacts produced by the offline trainer
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoders: PathBuf,
}

/// On-disk shape of the encoders artifact
#[derive(Debug, Deserialize)]
struct EncodersArtifact {
    schema: FeatureSchema,
    encoders: EncoderSet,
}

/// Classifier + encoder map + feature schema, owned by the serving process
pub struct ArtifactBundle {
    schema: FeatureSchema,
    encoders: EncoderSet,
    model: ForestModel,
}

impl ArtifactBundle {
    /// Load and cross-validate both artifacts
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let encoders_raw = std::fs::read_to_string(&paths.encoders)?;
        let EncodersArtifact { schema, encoders } = serde_json::from_str(&encoders_raw)?;

        let model_raw = std::fs::read_to_string(&paths.model)?;
        let model: ForestModel = serde_json::from_str(&model_raw)?;

        let bundle = Self {
            schema,
            encoders,
            model,
        };
        bundle.validate()?;

        info!(
            columns = bundle.schema.len(),
            encoders = bundle.encoders.len(),
            trees = bundle.model.trees.len(),
            "artifact bundle loaded"
        );
        Ok(bundle)
    }

    fn validate(&self) -> Result<()> {
        if self.schema.is_empty() {
            return Err(Error::config("feature schema is empty"));
        }
        if self.model.n_features != self.schema.len() {
            return Err(Error::config(format!(
                "model expects {} features, schema has {} columns",
                self.model.n_features,
                self.schema.len()
            )));
        }
        for column in self.schema.columns() {
            if column.kind == ColumnKind::Categorical {
                let encoder = self.encoders.get(&column.name).ok_or_else(|| {
                    Error::config(format!(
                        "categorical column '{}' has no encoder in the artifact",
                        column.name
                    ))
                })?;
                if encoder.classes().is_empty() {
                    return Err(Error::config(format!(
                        "encoder for column '{}' has no classes",
                        column.name
                    )));
                }
            }
        }
        self.model.validate()
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    pub fn model(&self) -> &ForestModel {
        &self.model
    }

    /// The full risk pipeline: assemble, predict, tier
    pub fn score(&self, request: &DiagnosisRequest) -> Result<RiskAssessment> {
        let assembler = FeatureAssembler::new(&self.schema, &self.encoders);
        let features = assembler.assemble(request)?;

        let classifier = RiskClassifier::new(&self.model, self.schema.len());
        let prediction = classifier.predict(&features)?;

        Ok(tier::assess(prediction.probability, prediction.confidence))
    }
}

/// Shared handle to the current bundle.
///
/// `None` models the degraded state after a failed startup load: the
/// service keeps running but risk scoring fails fast. Reload swaps the
/// whole `Arc`, so in-flight requests finish against the bundle they
/// started with.
#[derive(Clone)]
pub struct SharedBundle {
    inner: Arc<RwLock<Option<Arc<ArtifactBundle>>>>,
}

impl SharedBundle {
    /// Degraded state: no artifact available
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    pub fn new(bundle: ArtifactBundle) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(bundle)))),
        }
    }

    /// Current bundle, or `None` while degraded
    pub fn current(&self) -> Option<Arc<ArtifactBundle>> {
        self.inner.read().unwrap().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }

    /// Replace the bundle atomically
    pub fn swap(&self, bundle: ArtifactBundle) {
        *self.inner.write().unwrap() = Some(Arc::new(bundle));
    }
}

impl Default for SharedBundle {
    fn default() -> Self {
        Self::empty()
    }
}
