//! HTTP implementations of the external collaborator seams
//!
//! Both collaborators are plain request/response HTTP calls with the
//! shared client built once in app state. Failures map to the external
//! error kind and are never retried here.

use async_trait::async_trait;
use celiguard_core::{Error, ProductInfo, Result};
use celiguard_scan::{BarcodeLookup, TextExtractor};
use serde::Deserialize;
use tracing::debug;

/// Product-database client (Open Food Facts compatible response shape)
pub struct HttpBarcodeLookup {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ProductLookupResponse {
    product: Option<ProductPayload>,
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    product_name: Option<String>,
    ingredients_text: Option<String>,
}

impl HttpBarcodeLookup {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BarcodeLookup for HttpBarcodeLookup {
    async fn lookup(&self, barcode: &str) -> Result<ProductInfo> {
        let url = format!(
            "{}/product/{}.json",
            self.base_url.trim_end_matches('/'),
            barcode
        );
        debug!(%url, "looking up barcode");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::external(format!("product lookup request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::external(format!(
                "product lookup returned status {}",
                response.status()
            )));
        }

        let body: ProductLookupResponse = response
            .json()
            .await
            .map_err(|e| Error::external(format!("product lookup returned invalid body: {e}")))?;

        let product = body
            .product
            .ok_or_else(|| Error::external("barcode not found in product database"))?;
        let ingredients_text = product
            .ingredients_text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::external("product has no ingredient data"))?;

        Ok(ProductInfo {
            name: product.product_name,
            ingredients_text,
        })
    }
}

/// Remote OCR engine client
pub struct HttpTextExtractor {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    text: String,
}

impl HttpTextExtractor {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TextExtractor for HttpTextExtractor {
    async fn extract(&self, image_base64: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "image": image_base64,
                "languages": ["ara", "eng"],
            }))
            .send()
            .await
            .map_err(|e| Error::external(format!("ocr request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::external(format!(
                "ocr engine returned status {}",
                response.status()
            )));
        }

        let body: OcrResponse = response
            .json()
            .await
            .map_err(|e| Error::external(format!("ocr engine returned invalid body: {e}")))?;

        Ok(body.text)
    }
}
