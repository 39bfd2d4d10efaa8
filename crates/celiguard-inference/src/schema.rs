//! Training-time feature schema
//!
//! The schema is fixed when the artifact is built: an ordered sequence of
//! column descriptors. The classifier is positional, so assembler output
//! must reproduce exactly this order.

use serde::{Deserialize, Serialize};

/// Kind of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Continuous measurement, passes through as-is
    Numeric,
    /// Fixed label set, encoded to a dense integer code
    Categorical,
}

/// One column of the training-time data frame (minus the label column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Categorical,
        }
    }
}

/// Ordered column descriptors fixed at artifact-build time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// Number of columns the classifier expects
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in their fixed training-time order
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }
}
