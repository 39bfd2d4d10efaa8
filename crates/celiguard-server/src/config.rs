//! Service configuration and CLI

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "celiguard-server")]
#[command(about = "Celiac risk scoring and gluten screening service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Classifier artifact path
    #[arg(short, long)]
    pub model: Option<String>,

    /// Encoders artifact path
    #[arg(short, long)]
    pub encoders: Option<String>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    pub listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8080")]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Celiguard service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Path to the trained classifier artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Path to the encoders + schema artifact
    #[serde(default = "default_encoders_path")]
    pub encoders_path: String,

    /// Base URL of the external product database; barcode scans degrade
    /// to a conservative verdict when unset
    #[serde(default)]
    pub product_lookup_url: Option<String>,

    /// Endpoint of the external OCR engine; image scans are rejected
    /// when unset
    #[serde(default)]
    pub ocr_url: Option<String>,

    /// Timeout for external collaborator calls, in seconds
    #[serde(default = "default_external_timeout")]
    pub external_timeout_secs: u64,

    /// Request body cap; image payloads arrive base64-encoded
    #[serde(default = "default_body_limit")]
    pub max_body_bytes: usize,
}

impl ServiceConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.model_path = model.clone();
        }

        if let Some(encoders) = &cli.encoders {
            config.encoders_path = encoders.clone();
        }

        Ok(config)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            encoders_path: default_encoders_path(),
            product_lookup_url: None,
            ocr_url: None,
            external_timeout_secs: default_external_timeout(),
            max_body_bytes: default_body_limit(),
        }
    }
}

fn default_model_path() -> String {
    "./models/celiac_model.json".to_string()
}

fn default_encoders_path() -> String {
    "./models/feature_encoders.json".to_string()
}

fn default_external_timeout() -> u64 {
    30
}

fn default_body_limit() -> usize {
    4 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_with_partial_fields() {
        let yaml = "model_path: /opt/models/model.json\nocr_url: http://ocr:9000/extract\n";
        let config: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.model_path, "/opt/models/model.json");
        assert_eq!(config.ocr_url.as_deref(), Some("http://ocr:9000/extract"));
        assert_eq!(config.encoders_path, default_encoders_path());
        assert_eq!(config.external_timeout_secs, 30);
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert!(config.product_lookup_url.is_none());
        assert_eq!(config.max_body_bytes, 4 * 1024 * 1024);
    }
}
