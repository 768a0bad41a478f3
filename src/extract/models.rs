use serde::{Deserialize, Serialize};

use crate::lexicon::{BudgetTier, CategoryId};

/// A user query in raw and normalized form. Immutable once created;
/// normalization is trim + lowercase and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText {
    raw: String,
    normalized: String,
}

impl QueryText {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: raw.trim().to_lowercase(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whitespace tokens of the normalized text.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.normalized.split_whitespace()
    }
}

/// Structured search criteria derived from a free-text query.
///
/// Invariant: `explicit_price` set implies `budget_tier == Specific` and
/// `budget_ceiling == explicit_price`; otherwise the ceiling is the lexicon
/// default for (category, tier). Never mutated after creation.
///
/// Serialized field names follow the wire contract consumed by the response
/// layer (`max_budget`, `budget_type`, `specific_budget`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub category: Option<CategoryId>,
    #[serde(rename = "max_budget")]
    pub budget_ceiling: u64,
    #[serde(rename = "budget_type")]
    pub budget_tier: BudgetTier,
    #[serde(rename = "specific_budget")]
    pub explicit_price: Option<u64>,
    pub original_query: String,
}

impl Constraints {
    /// Extraction outcomes that matter for retrieval and scoring, without the
    /// raw query echo. Used by tests to compare queries that normalize to the
    /// same text.
    pub fn outcome(&self) -> (Option<CategoryId>, BudgetTier, u64, Option<u64>) {
        (
            self.category,
            self.budget_tier,
            self.budget_ceiling,
            self.explicit_price,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text_normalization() {
        let query = QueryText::new("  Red Running SHOES under 3000 ");
        assert_eq!(query.raw(), "  Red Running SHOES under 3000 ");
        assert_eq!(query.normalized(), "red running shoes under 3000");
        assert_eq!(query.tokens().count(), 5);
    }

    #[test]
    fn test_query_text_empty() {
        assert!(QueryText::new("   ").is_empty());
        assert!(QueryText::new("").is_empty());
    }

    #[test]
    fn test_constraints_wire_field_names() {
        let constraints = Constraints {
            category: Some(CategoryId::Apparel),
            budget_ceiling: 3000,
            budget_tier: BudgetTier::Specific,
            explicit_price: Some(3000),
            original_query: "red shoes under 3000".to_string(),
        };
        let json = serde_json::to_value(&constraints).unwrap();
        assert_eq!(json["category"], "apparel");
        assert_eq!(json["max_budget"], 3000);
        assert_eq!(json["budget_type"], "specific");
        assert_eq!(json["specific_budget"], 3000);
        assert_eq!(json["original_query"], "red shoes under 3000");
    }
}
