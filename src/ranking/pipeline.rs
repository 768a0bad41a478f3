use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::cache::ResultCache;
use super::scorer::RelevanceScorer;
use crate::catalog::{CatalogError, CatalogQuery, CatalogRepository, PriceRange, Product};
use crate::core::config::ShopLensConfig;
use crate::extract::models::QueryText;
use crate::extract::provider::{ConstraintProvider, RuleBasedProvider};
use crate::extract::ConstraintExtractor;
use crate::lexicon::{CategoryId, Lexicon};
use crate::utils::preview;

/// Final response of one pipeline run, shaped for JSON serialization by the
/// transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<crate::extract::Constraints>,
    pub products: Vec<Product>,
    pub total_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_budget: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineResult {
    fn failure(query: &str, error: String) -> Self {
        Self {
            success: false,
            query: query.to_string(),
            analysis: None,
            products: Vec::new(),
            total_found: 0,
            category: None,
            max_budget: None,
            error: Some(error),
        }
    }
}

/// Search suggestions for a query, mainly useful when no category resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestions {
    pub categories: Vec<CategoryId>,
    pub price_range: Option<PriceRange>,
    pub popular_brands: Vec<String>,
    pub sample_products: Vec<Product>,
}

const SUGGESTION_BRAND_LIMIT: usize = 5;
const SUGGESTION_SAMPLE_LIMIT: usize = 3;

/// Orchestrates extract, retrieve, score, sort, truncate. Stateless per
/// call; every stage failure is caught here and converted into a failed
/// result. Nothing propagates past the pipeline boundary.
pub struct RankingPipeline {
    provider: Arc<dyn ConstraintProvider>,
    catalog: Arc<dyn CatalogRepository>,
    scorer: RelevanceScorer,
    extractor: ConstraintExtractor,
    result_limit: usize,
    cache: Option<ResultCache<PipelineResult>>,
}

impl RankingPipeline {
    pub fn new(
        provider: Arc<dyn ConstraintProvider>,
        catalog: Arc<dyn CatalogRepository>,
        lexicon: Arc<Lexicon>,
        config: &ShopLensConfig,
    ) -> Self {
        let cache = config
            .cache_enabled
            .then(|| ResultCache::new(config.cache_size, config.cache_ttl_secs));
        Self {
            provider,
            catalog,
            scorer: RelevanceScorer::new(Arc::clone(&lexicon)),
            extractor: ConstraintExtractor::new(lexicon),
            result_limit: config.effective_result_limit(),
            cache,
        }
    }

    /// Pipeline with the rule-based extractor as the only provider.
    pub fn rule_based(
        catalog: Arc<dyn CatalogRepository>,
        lexicon: Arc<Lexicon>,
        config: &ShopLensConfig,
    ) -> Self {
        let provider = Arc::new(RuleBasedProvider::new(Arc::clone(&lexicon)));
        Self::new(provider, catalog, lexicon, config)
    }

    pub async fn process(&self, raw_query: &str) -> PipelineResult {
        info!("Processing query: {}", preview(raw_query, 80));

        let query = QueryText::new(raw_query);
        let cache_key = ResultCache::<PipelineResult>::make_key(query.normalized(), self.result_limit);
        if let Some(cache) = &self.cache {
            if let Some(result) = cache.get(&cache_key) {
                debug!("Cache hit");
                return result;
            }
        }

        let constraints = match self.provider.extract(raw_query).await {
            Ok(constraints) => constraints,
            Err(e) => {
                error!("Constraint extraction failed: {}", e);
                return PipelineResult::failure(raw_query, e.to_string());
            }
        };
        debug!(
            "Constraints: category={:?} ceiling={} tier={}",
            constraints.category, constraints.budget_ceiling, constraints.budget_tier
        );

        let catalog_query = CatalogQuery {
            free_text: Some(raw_query.to_string()),
            category: constraints.category,
            max_price: Some(constraints.budget_ceiling),
            ..Default::default()
        };
        let candidates = match self.catalog.search(&catalog_query) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Catalog retrieval failed: {}", e);
                return PipelineResult::failure(raw_query, e.to_string());
            }
        };
        let total_found = candidates.len();
        debug!("Retrieved {} candidates", total_found);

        // Stable sort: equal scores keep catalog iteration order, so output
        // is reproducible for an unchanged catalog.
        let mut scored: Vec<(f64, Product)> = candidates
            .into_iter()
            .map(|product| {
                let score = self.scorer.score(&product, &query, &constraints);
                (score, product)
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let products: Vec<Product> = scored
            .into_iter()
            .take(self.result_limit)
            .map(|(_, product)| product)
            .collect();

        info!(
            "Query processed: {} of {} results returned",
            products.len(),
            total_found
        );

        let result = PipelineResult {
            success: true,
            query: raw_query.to_string(),
            category: constraints.category,
            max_budget: Some(constraints.budget_ceiling),
            analysis: Some(constraints),
            products,
            total_found,
            error: None,
        };

        if let Some(cache) = &self.cache {
            cache.set(&cache_key, result.clone());
        }

        result
    }

    /// Category recommendations and a catalog preview for a query. When the
    /// category is unresolved, candidate categories come from keyword hit
    /// counts; otherwise the resolved category's price span, brands, and a
    /// few sample products are returned.
    pub fn suggestions(&self, raw_query: &str) -> Result<Suggestions, CatalogError> {
        let constraints = self.extractor.extract(raw_query);

        let Some(category) = constraints.category else {
            return Ok(Suggestions {
                categories: self.extractor.category_suggestions(raw_query),
                price_range: None,
                popular_brands: Vec::new(),
                sample_products: Vec::new(),
            });
        };

        let products = self.catalog.search(&CatalogQuery {
            category: Some(category),
            ..Default::default()
        })?;

        if products.is_empty() {
            warn!("No catalog products for suggested category {}", category);
        }

        let mut popular_brands: Vec<String> = Vec::new();
        for product in &products {
            if !popular_brands.contains(&product.brand) {
                popular_brands.push(product.brand.clone());
            }
            if popular_brands.len() == SUGGESTION_BRAND_LIMIT {
                break;
            }
        }

        let min = products.iter().map(|p| p.price).min();
        let max = products.iter().map(|p| p.price).max();
        let price_range = min.zip(max).map(|(min, max)| PriceRange { min, max });

        let sample_products = products
            .into_iter()
            .take(SUGGESTION_SAMPLE_LIMIT)
            .collect();

        Ok(Suggestions {
            categories: vec![category],
            price_range,
            popular_brands,
            sample_products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::BudgetTier;

    fn product(
        name: &str,
        price: u64,
        rating: f64,
        category: CategoryId,
        brand: &str,
        color: &str,
    ) -> Product {
        Product {
            id: String::new(),
            name: name.to_string(),
            description: format!("{name} with great build quality"),
            price,
            rating,
            category,
            brand: brand.to_string(),
            color: color.to_string(),
            platform: "Amazon".to_string(),
            buy_link: String::new(),
            image_url: String::new(),
        }
    }

    fn sample_catalog() -> Arc<crate::catalog::InMemoryCatalog> {
        Arc::new(crate::catalog::InMemoryCatalog::new(vec![
            product("Red Nike Air Max running shoes", 2499, 4.5, CategoryId::Apparel, "Nike", "red"),
            product("Red Puma sprint shoes", 2799, 4.2, CategoryId::Apparel, "Puma", "red"),
            product("Blue Adidas running shoes", 2299, 4.3, CategoryId::Apparel, "Adidas", "blue"),
            product("White Converse sneakers", 3499, 4.0, CategoryId::Apparel, "Converse", "white"),
            product("Blue Levis denim jacket", 1999, 4.1, CategoryId::Apparel, "Levis", "blue"),
            product("MacBook Air M2 laptop", 99_900, 4.8, CategoryId::Electronics, "Apple", "silver"),
            product("ThinkPad E14 laptop", 55_000, 4.3, CategoryId::Electronics, "Lenovo", "black"),
            product("HP Pavilion laptop", 62_000, 4.1, CategoryId::Electronics, "HP", "silver"),
            product("Redmi Note 13 phone", 14_999, 4.2, CategoryId::Mobiles, "Xiaomi", "blue"),
            product("Galaxy M34 phone", 16_499, 4.2, CategoryId::Mobiles, "Samsung", "black"),
            product("iPhone 13 phone", 52_999, 4.6, CategoryId::Mobiles, "Apple", "black"),
        ]))
    }

    fn pipeline() -> RankingPipeline {
        let lexicon = Arc::new(Lexicon::default());
        RankingPipeline::rule_based(sample_catalog(), lexicon, &ShopLensConfig::default())
    }

    struct BrokenCatalog;

    impl CatalogRepository for BrokenCatalog {
        fn search(&self, _query: &CatalogQuery) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Query("storage offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_scenario_red_running_shoes_under_3000() {
        let result = pipeline().process("red running shoes under 3000").await;

        assert!(result.success);
        let analysis = result.analysis.as_ref().unwrap();
        assert_eq!(analysis.category, Some(CategoryId::Apparel));
        assert_eq!(analysis.budget_tier, BudgetTier::Specific);
        assert_eq!(analysis.budget_ceiling, 3000);

        assert!(!result.products.is_empty());
        assert!(result.products.len() <= 3);
        for product in &result.products {
            assert_eq!(product.category, CategoryId::Apparel);
            assert!(product.price <= 3000);
        }
        // The red Nike is the best multi-factor match.
        assert_eq!(result.products[0].name, "Red Nike Air Max running shoes");
    }

    #[tokio::test]
    async fn test_scenario_non_apple_laptop() {
        let result = pipeline().process("non-Apple laptop").await;

        assert!(result.success);
        assert_eq!(result.category, Some(CategoryId::Electronics));
        assert!(!result.products.is_empty());
        for product in &result.products {
            assert!(!product.brand.to_lowercase().contains("apple"));
        }
    }

    #[tokio::test]
    async fn test_scenario_cheap_mobile_phones() {
        let result = pipeline().process("cheap mobile phones").await;

        assert!(result.success);
        let analysis = result.analysis.as_ref().unwrap();
        assert_eq!(analysis.category, Some(CategoryId::Mobiles));
        assert_eq!(analysis.budget_tier, BudgetTier::Low);
        assert_eq!(analysis.budget_ceiling, 15_000);
        for product in &result.products {
            assert!(product.price <= 15_000);
        }
    }

    #[tokio::test]
    async fn test_scenario_empty_query() {
        let result = pipeline().process("").await;

        assert!(result.success);
        let analysis = result.analysis.as_ref().unwrap();
        assert_eq!(analysis.category, None);
        assert_eq!(analysis.budget_tier, BudgetTier::Low);
        assert_eq!(analysis.budget_ceiling, 50_000);
        assert!(result.products.len() <= 3);
    }

    #[tokio::test]
    async fn test_truncation_and_total_found() {
        let result = pipeline().process("shoes").await;

        assert!(result.success);
        assert!(result.products.len() <= 3);
        // All five apparel items are within the (apparel, low) default
        // ceiling except the 3499 sneakers.
        assert!(result.total_found >= result.products.len());
    }

    #[tokio::test]
    async fn test_determinism() {
        let pipeline = pipeline();
        let first = pipeline.process("blue shoes under 3000").await;
        for _ in 0..5 {
            let next = pipeline.process("blue shoes under 3000").await;
            assert_eq!(
                serde_json::to_value(&next).unwrap(),
                serde_json::to_value(&first).unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_repository_failure_is_contained() {
        let lexicon = Arc::new(Lexicon::default());
        let pipeline = RankingPipeline::rule_based(
            Arc::new(BrokenCatalog),
            lexicon,
            &ShopLensConfig::default(),
        );

        let result = pipeline.process("red shoes").await;
        assert!(!result.success);
        assert!(result.products.is_empty());
        assert!(result.error.as_ref().unwrap().contains("storage offline"));
    }

    #[tokio::test]
    async fn test_no_matches_is_success_not_error() {
        let result = pipeline().process("purple kayak under 200").await;
        assert!(result.success);
        assert_eq!(result.total_found, 0);
        assert!(result.products.is_empty());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_cached_pipeline_repeats_result() {
        let lexicon = Arc::new(Lexicon::default());
        let mut config = ShopLensConfig::default();
        config.cache_enabled = true;
        let pipeline = RankingPipeline::rule_based(sample_catalog(), lexicon, &config);

        let first = pipeline.process("red shoes under 3000").await;
        let second = pipeline.process("red shoes under 3000").await;
        assert_eq!(
            serde_json::to_value(&second).unwrap(),
            serde_json::to_value(&first).unwrap()
        );
    }

    #[test]
    fn test_suggestions_for_unresolved_category() {
        let pipeline = pipeline();
        let suggestions = pipeline.suggestions("something nice").unwrap();
        assert!(suggestions.categories.is_empty());
        assert!(suggestions.price_range.is_none());
        assert!(suggestions.sample_products.is_empty());
    }

    #[test]
    fn test_suggestions_for_resolved_category() {
        let pipeline = pipeline();
        let suggestions = pipeline.suggestions("running shoes").unwrap();
        assert_eq!(suggestions.categories, vec![CategoryId::Apparel]);

        let range = suggestions.price_range.unwrap();
        assert_eq!(range.min, 1999);
        assert_eq!(range.max, 3499);
        assert!(suggestions.popular_brands.len() <= 5);
        assert_eq!(suggestions.sample_products.len(), 3);
    }

    #[tokio::test]
    async fn test_serialized_response_shape() {
        let result = pipeline().process("red running shoes under 3000").await;
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["query"], "red running shoes under 3000");
        assert_eq!(json["analysis"]["budget_type"], "specific");
        assert_eq!(json["analysis"]["max_budget"], 3000);
        assert_eq!(json["category"], "apparel");
        assert_eq!(json["max_budget"], 3000);
        assert!(json["total_found"].as_u64().is_some());
        assert!(json.get("error").is_none());
    }
}
