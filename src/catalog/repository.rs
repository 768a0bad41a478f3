use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::models::Product;
use crate::extract::patterns::excluded_brand;
use crate::lexicon::CategoryId;


#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog load error: {0}")]
    Load(String),

    #[error("Catalog query error: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structured filter for catalog retrieval. Every supplied criterion must
/// hold for a product to match.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub free_text: Option<String>,
    pub category: Option<CategoryId>,
    pub max_price: Option<u64>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub platform: Option<String>,
}

/// Read-only structured retrieval over a product collection. The returned
/// sequence carries the repository's own ordering, which is unrelated to
/// query relevance; the ranking pipeline re-sorts it.
pub trait CatalogRepository: Send + Sync {
    fn search(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError>;
}

/// Price span of a catalog subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

/// In-memory reference repository: a product list loaded once at startup,
/// filtered per query. Results are ordered rating-descending, then
/// price-ascending, so equal-relevance candidates rank reproducibly.
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| CatalogError::Load(e.to_string()))?;
        Ok(Self::new(products))
    }

    pub fn from_path(path: &str) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!("Catalog loaded from {} ({} products)", path, catalog.len());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn categories(&self) -> Vec<CategoryId> {
        let mut categories: Vec<CategoryId> =
            self.products.iter().map(|p| p.category).collect();
        categories.sort_by_key(|c| c.to_string());
        categories.dedup();
        categories
    }

    pub fn brands(&self) -> Vec<String> {
        let mut brands: Vec<String> = self.products.iter().map(|p| p.brand.clone()).collect();
        brands.sort();
        brands.dedup();
        brands
    }

    pub fn colors(&self) -> Vec<String> {
        let mut colors: Vec<String> = self.products.iter().map(|p| p.color.clone()).collect();
        colors.sort();
        colors.dedup();
        colors
    }

    pub fn platforms(&self) -> Vec<String> {
        let mut platforms: Vec<String> =
            self.products.iter().map(|p| p.platform.clone()).collect();
        platforms.sort();
        platforms.dedup();
        platforms
    }

    pub fn price_range(&self, category: Option<CategoryId>) -> Option<PriceRange> {
        let prices: Vec<u64> = self
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .map(|p| p.price)
            .collect();
        let min = *prices.iter().min()?;
        let max = *prices.iter().max()?;
        Some(PriceRange { min, max })
    }

    pub fn top_rated(&self, category: Option<CategoryId>, limit: usize) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();
        products.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        products.truncate(limit);
        products
    }

    fn matches_free_text(product: &Product, tokens: &[&str]) -> bool {
        let category = product.category.to_string();
        tokens.iter().any(|token| {
            product.name.to_lowercase().contains(token)
                || product.description.to_lowercase().contains(token)
                || category.contains(token)
                || product.brand.to_lowercase().contains(token)
                || product.color.to_lowercase().contains(token)
        })
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn search(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError> {
        let mut results: Vec<Product> = self.products.clone();

        if let Some(category) = query.category {
            results.retain(|p| p.category == category);
        }
        if let Some(max_price) = query.max_price {
            results.retain(|p| p.price <= max_price);
        }
        if let Some(brand) = &query.brand {
            let brand = brand.to_lowercase();
            results.retain(|p| p.brand.to_lowercase().contains(&brand));
        }
        if let Some(color) = &query.color {
            let color = color.to_lowercase();
            results.retain(|p| p.color.to_lowercase().contains(&color));
        }
        if let Some(platform) = &query.platform {
            results.retain(|p| p.platform.eq_ignore_ascii_case(platform));
        }

        if let Some(text) = &query.free_text {
            let normalized = text.to_lowercase();
            let tokens: Vec<&str> = normalized.split_whitespace().collect();
            if !tokens.is_empty() {
                results.retain(|p| Self::matches_free_text(p, &tokens));
            }

            // Brand exclusion overrides token matches: "non-apple laptop"
            // token-matches Apple products through "laptop".
            if let Some(excluded) = excluded_brand(&normalized) {
                results.retain(|p| !p.brand.to_lowercase().contains(&excluded));
            }
        }

        results.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.price.cmp(&b.price))
        });

        debug!("Catalog query matched {} products", results.len());
        Ok(results)
    }
}
