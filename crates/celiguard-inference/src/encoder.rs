//! Categorical label encoders loaded from the training artifact
//!
//! Each categorical column carries an ordered set of known class labels;
//! codes are dense integers `0..k-1` in the stable order the trainer
//! assigned (lexicographic). Decoding is never needed at inference time.

use std::collections::HashMap;

use celiguard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Code substituted for out-of-vocabulary values: the first known class
pub const FALLBACK_CODE: u32 = 0;

/// Label → code mapping for a single categorical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    classes: Vec<String>,
}

impl CategoryEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Known class labels in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// The designated fallback class (code 0 in the stable ordering).
    ///
    /// Callers must ensure the encoder is non-empty; bundle validation
    /// rejects empty encoders at load time.
    pub fn fallback_class(&self) -> &str {
        &self.classes[0]
    }

    /// Membership test, exact string match only
    pub fn contains(&self, value: &str) -> bool {
        self.code(value).is_some()
    }

    /// Exact-match lookup; `None` for values never seen during training
    pub fn code(&self, value: &str) -> Option<u32> {
        self.classes.iter().position(|c| c == value).map(|i| i as u32)
    }
}

/// The full map of per-column encoders from the training artifact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncoderSet {
    encoders: HashMap<String, CategoryEncoder>,
}

impl EncoderSet {
    pub fn new(encoders: HashMap<String, CategoryEncoder>) -> Self {
        Self { encoders }
    }

    pub fn get(&self, column: &str) -> Option<&CategoryEncoder> {
        self.encoders.get(column)
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// Encode `value` for `column`.
    ///
    /// Out-of-vocabulary values never fail: they resolve to the fallback
    /// class and the substitution is logged and counted, since it signals
    /// drift between training data and live traffic. A column with no
    /// registered encoder is a configuration error, not a pass-through.
    pub fn encode(&self, column: &str, value: &str) -> Result<u32> {
        let encoder = self
            .encoders
            .get(column)
            .ok_or_else(|| Error::config(format!("no encoder registered for column '{column}'")))?;

        match encoder.code(value) {
            Some(code) => Ok(code),
            None => {
                warn!(
                    column,
                    value,
                    fallback = encoder.fallback_class(),
                    "unseen categorical value, substituting fallback class"
                );
                metrics::counter!(
                    celiguard_telemetry::ENCODER_FALLBACK_TOTAL,
                    "column" => column.to_string()
                )
                .increment(1);
                Ok(FALLBACK_CODE)
            }
        }
    }
}
