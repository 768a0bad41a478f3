pub mod fallback;
pub mod remote;
pub mod rule_based;

pub use fallback::ProviderWithFallback;
pub use remote::RemoteProvider;
pub use rule_based::RuleBasedProvider;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use super::models::Constraints;


#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Constraint-extraction capability. The pipeline depends only on this
/// trait, so the rule-based core and a remote-service-backed provider are
/// interchangeable without touching ranking logic.
#[async_trait]
pub trait ConstraintProvider: Send + Sync {
    async fn extract(&self, query: &str) -> Result<Constraints, ProviderError>;

    fn provider_name(&self) -> &str;
}


#[async_trait]
impl ConstraintProvider for Arc<dyn ConstraintProvider> {
    async fn extract(&self, query: &str) -> Result<Constraints, ProviderError> {
        (**self).extract(query).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
