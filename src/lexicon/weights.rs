use serde::{Deserialize, Serialize};

/// Relevance scoring weights. Configuration, not hard-coded literals: the
/// scorer reads every factor from here so deployments can retune ranking
/// without touching the algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Added once per query token found in the product text.
    pub keyword_match: f64,
    /// Added when a color word from the query matches the product color.
    pub color_match: f64,
    /// Added when the product brand appears in the query.
    pub brand_match: f64,
    /// Scales the (1 - price/ceiling) term for products within budget.
    pub price_fit: f64,
    /// Flat deduction for products over the budget ceiling.
    pub over_budget_penalty: f64,
    /// Multiplier applied to the product rating.
    pub rating_weight: f64,
    /// Added when the product category equals the extracted category.
    pub category_match: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_match: 2.0,
            color_match: 3.0,
            brand_match: 2.0,
            price_fit: 2.0,
            over_budget_penalty: 5.0,
            rating_weight: 1.5,
            category_match: 1.0,
        }
    }
}
