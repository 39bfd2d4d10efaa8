//! OCR text extraction collaborator seam
//!
//! Optical character recognition is consumed as a pure `image → text`
//! function provided by an external engine. The analyzer itself stays
//! synchronous; only this call is awaited, once, by the request handler.

use async_trait::async_trait;
use celiguard_core::Result;

/// External text-extraction engine
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text from a base64-encoded image.
    ///
    /// A failed or slow extraction surfaces as a single per-request
    /// failure; the core never retries.
    async fn extract(&self, image_base64: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use celiguard_core::Error;

    struct FixedExtractor(&'static str);

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        async fn extract(&self, _image_base64: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl TextExtractor for FailingExtractor {
        async fn extract(&self, _image_base64: &str) -> Result<String> {
            Err(Error::external("ocr engine unreachable"))
        }
    }

    #[tokio::test]
    async fn test_extractor_seam() {
        let extractor = FixedExtractor("ingredients: wheat flour");
        let text = extractor.extract("aGVsbG8=").await.unwrap();
        assert_eq!(text, "ingredients: wheat flour");
    }

    #[tokio::test]
    async fn test_extraction_failure_is_external_error() {
        let err = FailingExtractor.extract("aGVsbG8=").await.unwrap_err();
        assert!(matches!(err, Error::External(_)));
    }
}
