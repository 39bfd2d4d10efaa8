//! Whole-word gluten keyword matcher
//!
//! Normalization is lowercase + trim only; no stemming or lemmatization.
//! Matching is word-boundary-delimited per keyword, with an Aho-Corasick
//! substring prefilter so clean text skips the per-keyword scan entirely.

use aho_corasick::AhoCorasick;
use celiguard_core::{Error, IngredientScanResult, Result};
use regex::Regex;

use crate::keywords::GlutenKeywordSet;

/// Fixed verdict for a gluten-positive scan
pub const VERDICT_UNSAFE: &str =
    "Gluten-containing ingredients were detected. This product is not safe for celiac patients.";

/// Fixed verdict for a clean scan
pub const VERDICT_SAFE: &str =
    "No gluten-containing ingredients were detected. This product is safe for celiac patients.";

/// Ingredient text analyzer over a fixed keyword set
pub struct GlutenAnalyzer {
    keywords: GlutenKeywordSet,
    patterns: Vec<Regex>,
    prefilter: AhoCorasick,
}

impl GlutenAnalyzer {
    /// Compile matchers for the given keyword set
    pub fn new(keywords: GlutenKeywordSet) -> Result<Self> {
        let patterns = keywords
            .keywords()
            .iter()
            .map(|k| {
                Regex::new(&format!(r"\b{}\b", regex::escape(&k.term))).map_err(|e| {
                    Error::config(format!(
                        "failed to compile matcher for keyword '{}': {e}",
                        k.term
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let prefilter = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(keywords.keywords().iter().map(|k| k.term.as_str()))
            .map_err(|e| Error::config(format!("failed to build keyword prefilter: {e}")))?;

        Ok(Self {
            keywords,
            patterns,
            prefilter,
        })
    }

    /// Analyzer over the built-in bilingual keyword list
    pub fn with_default_keywords() -> Result<Self> {
        Self::new(GlutenKeywordSet::default())
    }

    pub fn keywords(&self) -> &GlutenKeywordSet {
        &self.keywords
    }

    /// Scan `text` for gluten-risk substances.
    ///
    /// Matched terms are reported in keyword-list order, not text
    /// occurrence order. Synchronous and CPU-bound; any OCR step happens
    /// before the text reaches this function.
    pub fn analyze(&self, text: &str) -> IngredientScanResult {
        let normalized = text.trim().to_lowercase();

        // Substring hits are a superset of whole-word hits, so a miss here
        // means the per-keyword scan cannot match either.
        if self.prefilter.find(&normalized).is_none() {
            return IngredientScanResult {
                contains_gluten: false,
                matched_terms: Vec::new(),
                verdict_text: VERDICT_SAFE.to_string(),
            };
        }

        let matched_terms: Vec<String> = self
            .keywords
            .keywords()
            .iter()
            .zip(&self.patterns)
            .filter(|(_, pattern)| pattern.is_match(&normalized))
            .map(|(keyword, _)| keyword.term.clone())
            .collect();

        let contains_gluten = !matched_terms.is_empty();
        IngredientScanResult {
            contains_gluten,
            matched_terms,
            verdict_text: if contains_gluten {
                VERDICT_UNSAFE.to_string()
            } else {
                VERDICT_SAFE.to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> GlutenAnalyzer {
        GlutenAnalyzer::with_default_keywords().unwrap()
    }

    #[test]
    fn test_detects_wheat_flour() {
        let result = analyzer().analyze("this product contains wheat flour");
        assert!(result.contains_gluten);
        assert!(result.matched_terms.contains(&"wheat".to_string()));
        assert!(result.matched_terms.contains(&"wheat flour".to_string()));
        assert_eq!(result.verdict_text, VERDICT_UNSAFE);
    }

    #[test]
    fn test_clean_text_passes() {
        let result = analyzer().analyze("rice and corn only");
        assert!(!result.contains_gluten);
        assert!(result.matched_terms.is_empty());
        assert_eq!(result.verdict_text, VERDICT_SAFE);
    }

    #[test]
    fn test_whole_word_boundaries() {
        // "wheat" inside a larger word must not match
        let result = analyzer().analyze("wheaten-free snack");
        assert!(!result.matched_terms.contains(&"wheat".to_string()));

        // Adjacent punctuation still counts as a boundary
        let result = analyzer().analyze("contains wheat, sugar");
        assert!(result.matched_terms.contains(&"wheat".to_string()));

        let result = analyzer().analyze("buckwheat noodles");
        assert!(!result.contains_gluten);
    }

    #[test]
    fn test_case_and_whitespace_normalization() {
        let result = analyzer().analyze("  Contains WHEAT and Barley  ");
        assert!(result.contains_gluten);
        assert!(result.matched_terms.contains(&"wheat".to_string()));
        assert!(result.matched_terms.contains(&"barley".to_string()));
    }

    #[test]
    fn test_matches_report_in_keyword_list_order() {
        // Text order is reversed relative to the keyword list
        let result = analyzer().analyze("gluten from malt and barley and wheat");
        assert_eq!(
            result.matched_terms,
            vec![
                "wheat".to_string(),
                "barley".to_string(),
                "malt".to_string(),
                "gluten".to_string()
            ]
        );
    }

    #[test]
    fn test_arabic_keywords_match() {
        let result = analyzer().analyze("المكونات: قمح وسكر وملح");
        assert!(result.contains_gluten);
        assert!(result.matched_terms.contains(&"قمح".to_string()));
    }

    #[test]
    fn test_multi_word_keyword() {
        let result = analyzer().analyze("made with brewer's yeast extract");
        assert!(result.matched_terms.contains(&"brewer's yeast".to_string()));
    }

    #[test]
    fn test_empty_text() {
        let result = analyzer().analyze("");
        assert!(!result.contains_gluten);
        assert!(result.matched_terms.is_empty());
    }
}
