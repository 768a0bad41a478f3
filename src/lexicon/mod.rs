pub mod category;
pub mod tier;
pub mod weights;

pub use category::CategoryId;
pub use tier::BudgetTier;
pub use weights::ScoringWeights;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{Result, ShopLensError};
use crate::GLOBAL_DEFAULT_BUDGET;

/// Keyword set for one category. Declaration order across the lexicon is part
/// of the extraction contract: the first category with a hit wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: CategoryId,
    pub keywords: Vec<String>,
}

/// Keyword set for one budget tier, same first-match-wins ordering rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierKeywords {
    pub tier: BudgetTier,
    pub keywords: Vec<String>,
}

/// Default budget ceilings for one category, by tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryBudgets {
    pub category: CategoryId,
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

/// Static vocabulary and tuning tables consumed by the extractor and the
/// scorer. Immutable after construction and injected where needed; every
/// table can be replaced from a JSON file without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub categories: Vec<CategoryKeywords>,
    pub tiers: Vec<TierKeywords>,
    pub budgets: Vec<CategoryBudgets>,
    pub colors: Vec<String>,
    pub weights: ScoringWeights,
    pub fallback_budget: u64,
}

impl Lexicon {

    pub fn from_json_str(json: &str) -> Result<Self> {
        let lexicon: Self =
            serde_json::from_str(json).map_err(|e| ShopLensError::Lexicon(e.to_string()))?;
        Ok(lexicon)
    }


    pub fn from_path(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let lexicon = Self::from_json_str(&json)?;
        info!(
            "Lexicon loaded from {} ({} categories, {} colors)",
            path,
            lexicon.categories.len(),
            lexicon.colors.len()
        );
        Ok(lexicon)
    }

    /// Default ceiling for a (category, tier) pair. Unknown category, a
    /// category without a budget row, or the `specific` tier all resolve to
    /// the global fallback.
    pub fn default_budget(&self, category: Option<CategoryId>, tier: BudgetTier) -> u64 {
        let Some(category) = category else {
            return self.fallback_budget;
        };
        let Some(row) = self.budgets.iter().find(|b| b.category == category) else {
            return self.fallback_budget;
        };
        match tier {
            BudgetTier::Low => row.low,
            BudgetTier::Medium => row.medium,
            BudgetTier::High => row.high,
            BudgetTier::Specific => self.fallback_budget,
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect();

        Self {
            categories: vec![
                CategoryKeywords {
                    category: CategoryId::Apparel,
                    keywords: owned(&[
                        "shoes", "clothes", "t-shirt", "shirt", "pants", "trousers", "jeans",
                        "dress", "jacket", "coat", "footwear", "sneakers", "boots", "sandals",
                        "sweater", "hoodie", "joggers", "shorts", "skirt", "blouse",
                    ]),
                },
                CategoryKeywords {
                    category: CategoryId::Mobiles,
                    keywords: owned(&[
                        "phone", "smartphone", "mobile", "iphone", "android", "cellphone",
                        "redmi", "samsung", "realme", "vivo", "oppo", "oneplus", "nokia",
                        "moto", "motorola", "poco", "nothing", "google pixel",
                    ]),
                },
                CategoryKeywords {
                    category: CategoryId::Electronics,
                    keywords: owned(&[
                        "laptop", "computer", "pc", "notebook", "macbook", "thinkpad",
                        "tv", "television", "smart tv", "led tv", "4k tv",
                        "camera", "dslr", "mirrorless", "headphones", "earphones",
                        "speaker", "soundbar", "tablet", "ipad", "monitor", "keyboard",
                        "mouse", "printer", "scanner", "projector", "gaming console",
                    ]),
                },
            ],
            tiers: vec![
                TierKeywords {
                    tier: BudgetTier::Low,
                    keywords: owned(&[
                        "cheap", "budget", "affordable", "low cost", "economical",
                        "inexpensive", "under budget", "low price", "economy", "basic",
                        "entry level",
                    ]),
                },
                TierKeywords {
                    tier: BudgetTier::Medium,
                    keywords: owned(&[
                        "mid-range", "reasonable", "moderate", "mid priced", "standard",
                        "average", "decent", "fair price", "competitive", "value",
                    ]),
                },
                TierKeywords {
                    tier: BudgetTier::High,
                    keywords: owned(&[
                        "premium", "expensive", "high-end", "luxury", "top", "best",
                        "flagship", "professional", "pro", "ultimate", "elite",
                    ]),
                },
            ],
            budgets: vec![
                CategoryBudgets {
                    category: CategoryId::Apparel,
                    low: 3_000,
                    medium: 8_000,
                    high: 20_000,
                },
                CategoryBudgets {
                    category: CategoryId::Mobiles,
                    low: 15_000,
                    medium: 35_000,
                    high: 70_000,
                },
                CategoryBudgets {
                    category: CategoryId::Electronics,
                    low: 50_000,
                    medium: 100_000,
                    high: 250_000,
                },
            ],
            colors: owned(&[
                "red", "blue", "black", "white", "green", "yellow", "pink", "purple",
                "orange", "silver", "gold", "navy", "beige", "brown", "gray", "maroon",
                "cyan", "magenta", "violet", "indigo", "turquoise", "khaki",
            ]),
            weights: ScoringWeights::default(),
            fallback_budget: GLOBAL_DEFAULT_BUDGET,
        }
    }
}
