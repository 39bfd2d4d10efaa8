//! Feature assembly against the training-time schema
//!
//! The assembler turns an inbound request into the exact ordered numeric
//! vector the classifier was trained on: external field names map through
//! a fixed table onto canonical column names, absent columns take defined
//! defaults, and categorical columns run through the encoder set.

use std::collections::HashMap;

use celiguard_core::{DiagnosisRequest, FieldValue, Result};

use crate::encoder::{self, EncoderSet};
use crate::schema::{ColumnKind, FeatureSchema};

/// External field name → canonical schema column name.
/// External fields with no entry here are ignored, not errors.
const FIELD_MAP: &[(&str, &str)] = &[
    ("age", "Age"),
    ("gender", "Gender"),
    ("diabetes", "Diabetes"),
    ("diabetes_type", "Diabetes Type"),
    ("diarrhoea", "Diarrhoea"),
    ("abdominal", "Abdominal"),
    ("short_stature", "Short_Stature"),
    ("sticky_stool", "Sticky_Stool"),
    ("weight_loss", "Weight_loss"),
    ("iga", "IgA"),
    ("igg", "IgG"),
    ("igm", "IgM"),
    ("marsh", "Marsh"),
    ("cd_type", "cd_type"),
];

fn canonical_name(external: &str) -> Option<&'static str> {
    FIELD_MAP
        .iter()
        .find(|(ext, _)| *ext == external)
        .map(|(_, canonical)| *canonical)
}

/// Assembles request fields into the classifier's positional feature vector
pub struct FeatureAssembler<'a> {
    schema: &'a FeatureSchema,
    encoders: &'a EncoderSet,
}

impl<'a> FeatureAssembler<'a> {
    pub fn new(schema: &'a FeatureSchema, encoders: &'a EncoderSet) -> Self {
        Self { schema, encoders }
    }

    /// Assemble a typed diagnosis request
    pub fn assemble(&self, request: &DiagnosisRequest) -> Result<Vec<f64>> {
        self.assemble_fields(&request.fields())
    }

    /// Assemble from (external name, value) pairs.
    ///
    /// Output always has exactly one entry per schema column, in schema
    /// order. Missing numeric columns default to 0; missing categorical
    /// columns default to the encoder's fallback class.
    pub fn assemble_fields(&self, fields: &[(&str, FieldValue)]) -> Result<Vec<f64>> {
        let mut canonical: HashMap<&str, &FieldValue> = HashMap::new();
        for (external, value) in fields {
            if let Some(column) = canonical_name(external) {
                canonical.insert(column, value);
            }
        }

        let mut vector = Vec::with_capacity(self.schema.len());
        for column in self.schema.columns() {
            let value = match (column.kind, canonical.get(column.name.as_str())) {
                (ColumnKind::Numeric, Some(FieldValue::Number(n))) => *n,
                // Coerce stray string input for a numeric column
                (ColumnKind::Numeric, Some(FieldValue::Label(s))) => {
                    s.trim().parse::<f64>().unwrap_or(0.0)
                }
                (ColumnKind::Numeric, None) => 0.0,
                (ColumnKind::Categorical, Some(FieldValue::Label(s))) => {
                    f64::from(self.encoders.encode(&column.name, s)?)
                }
                // A number in a categorical column is treated as its text form
                (ColumnKind::Categorical, Some(FieldValue::Number(n))) => {
                    f64::from(self.encoders.encode(&column.name, &n.to_string())?)
                }
                (ColumnKind::Categorical, None) => {
                    // Documented default, not a drift event: make sure the
                    // column has an encoder, then take its first class.
                    self.encoders.get(&column.name).ok_or_else(|| {
                        celiguard_core::Error::config(format!(
                            "no encoder registered for column '{}'",
                            column.name
                        ))
                    })?;
                    f64::from(encoder::FALLBACK_CODE)
                }
            };
            vector.push(value);
        }

        Ok(vector)
    }
}
