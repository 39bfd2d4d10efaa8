//! Curated gluten-substance keyword list
//!
//! The keyword set is static and versioned with the service build; it is
//! partitioned by language for matching purposes. Order matters: scan
//! results report matched terms in keyword-list order.

use serde::{Deserialize, Serialize};

/// Language a keyword belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Arabic,
}

/// One substance term in the curated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub language: Language,
}

impl Keyword {
    pub fn new(term: impl Into<String>, language: Language) -> Self {
        Self {
            term: term.into(),
            language,
        }
    }
}

/// Gluten-risk substances known to the English matcher
const ENGLISH_TERMS: &[&str] = &[
    "wheat",
    "barley",
    "rye",
    "oats",
    "triticale",
    "spelt",
    "kamut",
    "bulgur",
    "couscous",
    "semolina",
    "durum",
    "farina",
    "malt",
    "brewer's yeast",
    "wheat bran",
    "wheat germ",
    "wheat flour",
    "gluten",
];

/// Gluten-risk substances known to the Arabic matcher
const ARABIC_TERMS: &[&str] = &[
    "قمح",
    "شعير",
    "جاودار",
    "شوفان",
    "تريتيكال",
    "سبلت",
    "كاموت",
    "برغل",
    "كسكس",
    "سميد",
    "دقيق",
    "جريش",
    "خميرة الجعة",
    "نخالة القمح",
    "مالت",
    "خميرة البيرة",
    "جرثومة القمح",
    "غلوتين",
];

/// Immutable multilingual substance list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlutenKeywordSet {
    keywords: Vec<Keyword>,
}

impl GlutenKeywordSet {
    pub fn new(keywords: Vec<Keyword>) -> Self {
        Self { keywords }
    }

    /// Keywords in their fixed list order
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Terms restricted to one language partition
    pub fn terms_for(&self, language: Language) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .filter(move |k| k.language == language)
            .map(|k| k.term.as_str())
    }
}

impl Default for GlutenKeywordSet {
    fn default() -> Self {
        let mut keywords = Vec::with_capacity(ENGLISH_TERMS.len() + ARABIC_TERMS.len());
        keywords.extend(
            ENGLISH_TERMS
                .iter()
                .map(|t| Keyword::new(*t, Language::English)),
        );
        keywords.extend(
            ARABIC_TERMS
                .iter()
                .map(|t| Keyword::new(*t, Language::Arabic)),
        );
        Self { keywords }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_covers_both_languages() {
        let set = GlutenKeywordSet::default();
        assert!(set.terms_for(Language::English).count() > 0);
        assert!(set.terms_for(Language::Arabic).count() > 0);
        assert_eq!(
            set.len(),
            set.terms_for(Language::English).count() + set.terms_for(Language::Arabic).count()
        );
    }

    #[test]
    fn test_core_substances_present() {
        let set = GlutenKeywordSet::default();
        let english: Vec<_> = set.terms_for(Language::English).collect();
        for term in ["wheat", "barley", "rye", "gluten"] {
            assert!(english.contains(&term), "missing {term}");
        }
        let arabic: Vec<_> = set.terms_for(Language::Arabic).collect();
        assert!(arabic.contains(&"قمح"));
        assert!(arabic.contains(&"غلوتين"));
    }

    #[test]
    fn test_list_order_is_stable() {
        let set = GlutenKeywordSet::default();
        assert_eq!(set.keywords()[0].term, "wheat");
    }
}
