//! Barcode product lookup collaborator seam
//!
//! The product database is an external service; this crate only defines
//! the trait and the conservative result used when no lookup is available
//! or the lookup fails. The HTTP implementation lives in the server crate.

use async_trait::async_trait;
use celiguard_core::{IngredientScanResult, ProductInfo, Result};

/// Fixed verdict when a barcode cannot be verified against product data.
/// Unverified products are treated as unsafe rather than safe.
pub const VERDICT_UNVERIFIED: &str =
    "Product could not be verified against the product database; treat it as containing gluten.";

/// External product-database lookup by barcode
#[async_trait]
pub trait BarcodeLookup: Send + Sync {
    /// Resolve a barcode to product data, including its ingredient text.
    ///
    /// Failures surface as a single per-request error; retries, if any,
    /// belong to the calling layer.
    async fn lookup(&self, barcode: &str) -> Result<ProductInfo>;
}

/// Conservative placeholder result for an unverifiable barcode
pub fn unverified_product_result() -> IngredientScanResult {
    IngredientScanResult {
        contains_gluten: true,
        matched_terms: Vec::new(),
        verdict_text: VERDICT_UNVERIFIED.to_string(),
    }
}
