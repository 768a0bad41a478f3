use std::sync::Arc;

use tracing::debug;

use super::models::{Constraints, QueryText};
use super::patterns::{
    extract_explicit_price, BRAND_EXCLUSION_PHRASES, CHEAPNESS_WORDS, COMPUTER_KEYWORDS,
};
use crate::lexicon::{BudgetTier, CategoryId, Lexicon};

/// Rule-based constraint extraction. A pure function of the query text and
/// the injected lexicon: identical input always yields identical output, and
/// extraction never fails. Absence of signal resolves to defaults instead.
#[derive(Clone)]
pub struct ConstraintExtractor {
    lexicon: Arc<Lexicon>,
}

impl ConstraintExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn extract(&self, raw_query: &str) -> Constraints {
        let query = QueryText::new(raw_query);
        let normalized = query.normalized();

        let category = self.detect_category(normalized);
        let explicit_price = extract_explicit_price(normalized);
        let budget_tier = if explicit_price.is_some() {
            BudgetTier::Specific
        } else {
            self.detect_tier(normalized)
        };
        let budget_ceiling = explicit_price
            .unwrap_or_else(|| self.lexicon.default_budget(category, budget_tier));

        debug!(
            "Extracted constraints: category={:?} tier={} ceiling={} explicit={:?}",
            category, budget_tier, budget_ceiling, explicit_price
        );

        Constraints {
            category,
            budget_ceiling,
            budget_tier,
            explicit_price,
            original_query: raw_query.to_string(),
        }
    }

    /// Candidate categories for an ambiguous query: per-category keyword hit
    /// counts, sorted descending, zero-hit categories omitted.
    pub fn category_suggestions(&self, raw_query: &str) -> Vec<CategoryId> {
        let query = QueryText::new(raw_query);
        let normalized = query.normalized();

        let mut scored: Vec<(CategoryId, usize)> = self
            .lexicon
            .categories
            .iter()
            .map(|set| {
                let hits = set
                    .keywords
                    .iter()
                    .filter(|kw| normalized.contains(kw.as_str()))
                    .count();
                (set.category, hits)
            })
            .filter(|(_, hits)| *hits > 0)
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(category, _)| category).collect()
    }

    /// First-match category scan in lexicon declaration order, preceded by
    /// the brand-exclusion special case: "non-apple laptop" style queries
    /// would otherwise hit no keyword set that names the excluded brand.
    fn detect_category(&self, normalized: &str) -> Option<CategoryId> {
        let has_exclusion = BRAND_EXCLUSION_PHRASES
            .iter()
            .any(|phrase| normalized.contains(phrase));
        if has_exclusion
            && COMPUTER_KEYWORDS.iter().any(|kw| normalized.contains(kw))
        {
            return Some(CategoryId::Electronics);
        }

        for set in &self.lexicon.categories {
            if set.keywords.iter().any(|kw| normalized.contains(kw.as_str())) {
                return Some(set.category);
            }
        }

        None
    }

    /// Tier keyword sets in declaration order, then generic cheapness words,
    /// then the low default. Only consulted when no explicit price matched.
    fn detect_tier(&self, normalized: &str) -> BudgetTier {
        for set in &self.lexicon.tiers {
            if set.keywords.iter().any(|kw| normalized.contains(kw.as_str())) {
                return set.tier;
            }
        }

        if CHEAPNESS_WORDS.iter().any(|w| normalized.contains(w)) {
            return BudgetTier::Low;
        }

        BudgetTier::Low
    }
}
