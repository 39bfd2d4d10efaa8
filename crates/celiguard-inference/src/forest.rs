//! Tree-ensemble classifier consumed read-only at serving time
//!
//! The offline trainer fits a random-forest-style ensemble and serializes
//! it to JSON; this module is the inference side of that contract. Each
//! leaf holds the class-1 vote fraction of its tree, and `predict_proba`
//! averages the trees into a two-class distribution.

use celiguard_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One node of a binary decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        /// Class-1 vote fraction in [0, 1]
        value: f64,
    },
}

impl TreeNode {
    fn validate(&self, n_features: usize) -> Result<()> {
        match self {
            Self::Leaf { value } => {
                if !(0.0..=1.0).contains(value) {
                    return Err(Error::config(format!(
                        "leaf value {value} outside [0, 1]"
                    )));
                }
                Ok(())
            }
            Self::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= n_features {
                    return Err(Error::config(format!(
                        "split references feature {feature}, model has {n_features}"
                    )));
                }
                left.validate(n_features)?;
                right.validate(n_features)
            }
        }
    }
}

/// A single fitted decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: TreeNode,
}

impl DecisionTree {
    /// Walk the tree for one feature vector; `<= threshold` goes left
    fn score(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Trained binary probabilistic ensemble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    /// Feature-vector width the model was fitted on
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Check internal consistency once at load time so per-request
    /// traversal can index features directly.
    pub fn validate(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(Error::config("model declares zero features"));
        }
        if self.trees.is_empty() {
            return Err(Error::config("model has no trees"));
        }
        for tree in &self.trees {
            tree.root.validate(self.n_features)?;
        }
        Ok(())
    }

    /// Average tree votes into `[p0, p1]`.
    ///
    /// Callers must pass a vector of exactly `n_features` values; the
    /// adapter enforces this before invoking the model.
    pub fn predict_proba(&self, features: &[f64]) -> [f64; 2] {
        let sum: f64 = self.trees.iter().map(|t| t.score(features)).sum();
        let p1 = (sum / self.trees.len() as f64).clamp(0.0, 1.0);
        [1.0 - p1, p1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_predict_proba_averages_trees() {
        let model = ForestModel {
            n_features: 2,
            trees: vec![stump(0, 10.0, 0.0, 1.0), stump(1, 5.0, 0.0, 0.5)],
        };

        // First tree goes right (1.0), second goes left (0.0)
        let [p0, p1] = model.predict_proba(&[20.0, 3.0]);
        assert_eq!(p1, 0.5);
        assert_eq!(p0, 0.5);

        // Both trees go right
        let [_, p1] = model.predict_proba(&[20.0, 9.0]);
        assert_eq!(p1, 0.75);
    }

    #[test]
    fn test_boundary_goes_left() {
        let model = ForestModel {
            n_features: 1,
            trees: vec![stump(0, 10.0, 0.2, 0.8)],
        };
        assert_eq!(model.predict_proba(&[10.0])[1], 0.2);
        assert_eq!(model.predict_proba(&[10.1])[1], 0.8);
    }

    #[test]
    fn test_validate_rejects_bad_feature_index() {
        let model = ForestModel {
            n_features: 1,
            trees: vec![stump(3, 1.0, 0.0, 1.0)],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_forest() {
        let model = ForestModel {
            n_features: 4,
            trees: vec![],
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_untagged_serde_round_trip() {
        let model = ForestModel {
            n_features: 2,
            trees: vec![stump(1, 0.5, 0.1, 0.9)],
        };
        let json = serde_json::to_string(&model).unwrap();
        let back: ForestModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
