//! Risk classifier adapter
//!
//! A thin, stateless wrapper over the trained ensemble. No business logic
//! lives here: the adapter validates vector width against the schema,
//! calls through to the model, and derives the confidence value.

use celiguard_core::{Error, Result};

use crate::forest::ForestModel;

/// Outcome of a single classifier invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Class-1 probability
    pub probability: f64,

    /// Maximum of the class probability distribution
    pub confidence: f64,
}

/// Adapter over the loaded classifier; stateless per call
pub struct RiskClassifier<'a> {
    model: &'a ForestModel,
    expected_len: usize,
}

impl<'a> RiskClassifier<'a> {
    pub fn new(model: &'a ForestModel, expected_len: usize) -> Self {
        Self {
            model,
            expected_len,
        }
    }

    /// Predict class-1 probability and confidence for one feature vector.
    ///
    /// A vector whose length mismatches the schema is rejected outright,
    /// never truncated or padded.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction> {
        if features.len() != self.expected_len {
            return Err(Error::schema_mismatch(format!(
                "feature vector has {} values, schema expects {}",
                features.len(),
                self.expected_len
            )));
        }

        let [p0, p1] = self.model.predict_proba(features);
        Ok(Prediction {
            probability: p1,
            confidence: p0.max(p1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{DecisionTree, TreeNode};

    fn constant_model(p1: f64) -> ForestModel {
        ForestModel {
            n_features: 3,
            trees: vec![DecisionTree {
                root: TreeNode::Leaf { value: p1 },
            }],
        }
    }

    #[test]
    fn test_confidence_is_max_class_probability() {
        let model = constant_model(0.2);
        let classifier = RiskClassifier::new(&model, 3);

        let prediction = classifier.predict(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(prediction.probability, 0.2);
        assert_eq!(prediction.confidence, 0.8);

        let model = constant_model(0.9);
        let classifier = RiskClassifier::new(&model, 3);
        let prediction = classifier.predict(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(prediction.confidence, 0.9);
    }

    #[test]
    fn test_length_mismatch_is_fatal() {
        let model = constant_model(0.5);
        let classifier = RiskClassifier::new(&model, 3);

        let err = classifier.predict(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));

        let err = classifier.predict(&[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }
}
