pub mod cache;
pub mod pipeline;
pub mod scorer;

pub use cache::{CacheStats, ResultCache};
pub use pipeline::{PipelineResult, RankingPipeline, Suggestions};
pub use scorer::RelevanceScorer;
