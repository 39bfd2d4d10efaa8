//! Celiguard Inference
//!
//! The celiac risk inference pipeline: feature assembly against the
//! training-time schema, categorical encoding with a stable fallback
//! policy, classifier invocation, and probability-to-tier mapping.
//!
//! Everything here is purely functional per request given a loaded
//! [`ArtifactBundle`]; the bundle itself is read-only for the process
//! lifetime and replaced only by whole-reference swap.

pub mod assembler;
pub mod bundle;
pub mod classifier;
pub mod encoder;
pub mod forest;
pub mod schema;
pub mod tier;

pub use assembler::FeatureAssembler;
pub use bundle::{ArtifactBundle, ArtifactPaths, SharedBundle};
pub use classifier::{Prediction, RiskClassifier};
pub use encoder::{CategoryEncoder, EncoderSet};
pub use forest::{DecisionTree, ForestModel, TreeNode};
pub use schema::{ColumnKind, ColumnSpec, FeatureSchema};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::assembler::FeatureAssembler;
    pub use crate::bundle::{ArtifactBundle, ArtifactPaths, SharedBundle};
    pub use crate::classifier::{Prediction, RiskClassifier};
    pub use crate::encoder::{CategoryEncoder, EncoderSet};
    pub use crate::schema::{ColumnKind, ColumnSpec, FeatureSchema};
}
