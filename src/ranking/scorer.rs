use std::sync::Arc;

use crate::catalog::Product;
use crate::extract::models::{Constraints, QueryText};
use crate::lexicon::Lexicon;

/// Weighted multi-factor relevance scoring. Deterministic and
/// side-effect-free; all weights come from the lexicon. Scores may go
/// negative: the scorer only reorders candidates, it never drops one.
#[derive(Clone)]
pub struct RelevanceScorer {
    lexicon: Arc<Lexicon>,
}

impl RelevanceScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, product: &Product, query: &QueryText, constraints: &Constraints) -> f64 {
        let weights = &self.lexicon.weights;
        let normalized = query.normalized();
        let product_text = product.search_text();
        let product_color = product.color.to_lowercase();

        let mut score = 0.0;

        for token in query.tokens() {
            if product_text.contains(token) {
                score += weights.keyword_match;
            }
        }

        for color in &self.lexicon.colors {
            if normalized.contains(color.as_str()) && product_color.contains(color.as_str()) {
                score += weights.color_match;
            }
        }

        if normalized.contains(&product.brand.to_lowercase()) {
            score += weights.brand_match;
        }

        if constraints.budget_ceiling > 0 {
            let price_ratio = product.price as f64 / constraints.budget_ceiling as f64;
            if price_ratio <= 1.0 {
                score += (1.0 - price_ratio) * weights.price_fit;
            } else {
                score -= weights.over_budget_penalty;
            }
        }

        score += product.rating * weights.rating_weight;

        if let Some(category) = constraints.category {
            if product.category == category {
                score += weights.category_match;
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{BudgetTier, CategoryId};

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new(Arc::new(Lexicon::default()))
    }

    fn product(name: &str, price: u64, rating: f64, brand: &str, color: &str) -> Product {
        Product {
            id: String::new(),
            name: name.to_string(),
            description: "comfortable running shoes".to_string(),
            price,
            rating,
            category: CategoryId::Apparel,
            brand: brand.to_string(),
            color: color.to_string(),
            platform: String::new(),
            buy_link: String::new(),
            image_url: String::new(),
        }
    }

    fn constraints(ceiling: u64, category: Option<CategoryId>) -> Constraints {
        Constraints {
            category,
            budget_ceiling: ceiling,
            budget_tier: BudgetTier::Specific,
            explicit_price: Some(ceiling),
            original_query: String::new(),
        }
    }

    #[test]
    fn test_color_and_brand_boost() {
        let query = QueryText::new("red nike shoes");
        let red_nike = product("Red Nike Air Max", 2499, 4.5, "Nike", "red");
        let blue_puma = product("Blue Puma Runner", 2499, 4.5, "Puma", "blue");

        let scorer = scorer();
        let cons = constraints(3000, Some(CategoryId::Apparel));
        let nike_score = scorer.score(&red_nike, &query, &cons);
        let puma_score = scorer.score(&blue_puma, &query, &cons);
        assert!(nike_score > puma_score);
    }

    #[test]
    fn test_over_budget_penalty_never_excludes() {
        let query = QueryText::new("running shoes under 2000");
        let affordable = product("Budget Runner", 1800, 4.0, "Decathlon", "black");
        let expensive = product("Premium Runner", 9000, 4.0, "Asics", "black");

        let scorer = scorer();
        let cons = constraints(2000, Some(CategoryId::Apparel));
        let affordable_score = scorer.score(&affordable, &query, &cons);
        let expensive_score = scorer.score(&expensive, &query, &cons);

        // Over budget is a heavy deprioritization, not an exclusion.
        assert!(affordable_score > expensive_score);
        assert!((affordable_score - expensive_score) >= 5.0);
    }

    #[test]
    fn test_price_fit_rewards_cheaper_within_budget() {
        let query = QueryText::new("shoes");
        let cheap = product("Runner A", 1000, 4.0, "BrandA", "black");
        let near_budget = product("Runner B", 2900, 4.0, "BrandB", "black");

        let scorer = scorer();
        let cons = constraints(3000, None);
        assert!(scorer.score(&cheap, &query, &cons) > scorer.score(&near_budget, &query, &cons));
    }

    #[test]
    fn test_zero_ceiling_skips_price_term() {
        let query = QueryText::new("shoes");
        let item = product("Runner", 1000, 4.0, "BrandA", "black");

        let scorer = scorer();
        let mut cons = constraints(0, None);
        cons.explicit_price = None;
        let score = scorer.score(&item, &query, &cons);
        // keyword "shoes" (2.0) + rating 4.0 * 1.5 = 8.0, no price term.
        assert!((score - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_rating_contribution() {
        let query = QueryText::new("shoes");
        let low_rated = product("Runner", 1500, 2.0, "BrandA", "black");
        let high_rated = product("Runner", 1500, 5.0, "BrandA", "black");

        let scorer = scorer();
        let cons = constraints(3000, None);
        let diff =
            scorer.score(&high_rated, &query, &cons) - scorer.score(&low_rated, &query, &cons);
        assert!((diff - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let query = QueryText::new("red nike shoes under 3000");
        let item = product("Red Nike Air Max", 2499, 4.5, "Nike", "red");
        let cons = constraints(3000, Some(CategoryId::Apparel));

        let scorer = scorer();
        let first = scorer.score(&item, &query, &cons);
        for _ in 0..10 {
            assert_eq!(scorer.score(&item, &query, &cons), first);
        }
    }
}
