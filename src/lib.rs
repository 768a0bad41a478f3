pub mod catalog;
pub mod core;
pub mod extract;
pub mod lexicon;
pub mod ranking;
pub mod utils;

pub use utils::preview;

pub use catalog::{CatalogError, CatalogQuery, CatalogRepository, InMemoryCatalog, Product};
pub use crate::core::config::ShopLensConfig;
pub use crate::core::error::{Result, ShopLensError};
pub use extract::provider::{
    ConstraintProvider, ProviderError, ProviderWithFallback, RemoteProvider, RuleBasedProvider,
};
pub use extract::{BudgetTier, ConstraintExtractor, Constraints, QueryText};
pub use lexicon::{CategoryId, Lexicon, ScoringWeights};
pub use ranking::{PipelineResult, RankingPipeline, RelevanceScorer, Suggestions};


pub const GLOBAL_DEFAULT_BUDGET: u64 = 50_000;


pub const DEFAULT_RESULT_LIMIT: usize = 3;


pub const MAX_RESULT_LIMIT: usize = 10;


pub const DEFAULT_REMOTE_URL: &str = "http://localhost:11434";


pub const DEFAULT_REMOTE_MODEL: &str = "llama3.1:8b";


pub const DEFAULT_CACHE_SIZE: usize = 1000;


pub const DEFAULT_CACHE_TTL: u64 = 300;
