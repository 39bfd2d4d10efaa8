//! Core domain types for celiguard

use serde::{Deserialize, Serialize};

/// A single questionnaire field value as submitted by the client
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric measurement (age, serology values)
    Number(f64),

    /// Categorical label (exact string, no normalization applied)
    Label(String),
}

/// Structured clinical questionnaire for celiac risk scoring.
///
/// Field names follow the public API contract; the feature assembler maps
/// them onto the training-time column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub age: f64,
    pub gender: String,
    pub diabetes: String,
    pub diabetes_type: String,
    pub diarrhoea: String,
    pub abdominal: String,
    pub short_stature: String,
    pub sticky_stool: String,
    pub weight_loss: String,
    pub iga: f64,
    pub igg: f64,
    pub igm: f64,
    pub marsh: String,
    pub cd_type: String,
}

impl DiagnosisRequest {
    /// Flatten the request into (external field name, value) pairs.
    ///
    /// This is the single point where the typed boundary struct becomes the
    /// loosely-keyed record the assembler consumes; nothing downstream sees
    /// a raw map that did not pass through here.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("age", FieldValue::Number(self.age)),
            ("gender", FieldValue::Label(self.gender.clone())),
            ("diabetes", FieldValue::Label(self.diabetes.clone())),
            ("diabetes_type", FieldValue::Label(self.diabetes_type.clone())),
            ("diarrhoea", FieldValue::Label(self.diarrhoea.clone())),
            ("abdominal", FieldValue::Label(self.abdominal.clone())),
            ("short_stature", FieldValue::Label(self.short_stature.clone())),
            ("sticky_stool", FieldValue::Label(self.sticky_stool.clone())),
            ("weight_loss", FieldValue::Label(self.weight_loss.clone())),
            ("iga", FieldValue::Number(self.iga)),
            ("igg", FieldValue::Number(self.igg)),
            ("igm", FieldValue::Number(self.igm)),
            ("marsh", FieldValue::Label(self.marsh.clone())),
            ("cd_type", FieldValue::Label(self.cd_type.clone())),
        ]
    }
}

/// Ordered risk tiers derived from the classifier's class-1 probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low Risk")]
    VeryLow,
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::VeryLow => "Very Low Risk",
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        };
        f.write_str(s)
    }
}

/// Per-request risk scoring outcome; never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Class-1 probability on the percentage scale, rounded to 2 decimals
    pub risk_percentage: f64,

    /// Tier assigned by the tiering policy
    pub risk_level: RiskLevel,

    /// Fixed advisory text for the assigned tier
    pub description: String,

    /// Maximum of the class probability distribution
    pub model_confidence: f64,
}

/// Per-request ingredient scan outcome; never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientScanResult {
    /// Whether any gluten-risk keyword matched
    pub contains_gluten: bool,

    /// Matched keywords in keyword-list order
    pub matched_terms: Vec<String>,

    /// One of two fixed verdict strings keyed on `contains_gluten`
    pub verdict_text: String,
}

/// Product data returned by the barcode lookup collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Display name, when the product database knows it
    pub name: Option<String>,

    /// Free-form ingredient listing to run through the analyzer
    pub ingredients_text: String,
}
