use async_trait::async_trait;
use std::sync::Arc;

use super::{ConstraintProvider, ProviderError};
use crate::extract::extractor::ConstraintExtractor;
use crate::extract::models::Constraints;
use crate::lexicon::Lexicon;

/// The rule-based core exposed through the provider seam. Infallible: the
/// extractor resolves missing signal to defaults instead of erroring.
pub struct RuleBasedProvider {
    extractor: ConstraintExtractor,
}

impl RuleBasedProvider {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            extractor: ConstraintExtractor::new(lexicon),
        }
    }
}

#[async_trait]
impl ConstraintProvider for RuleBasedProvider {
    async fn extract(&self, query: &str) -> Result<Constraints, ProviderError> {
        Ok(self.extractor.extract(query))
    }

    fn provider_name(&self) -> &str {
        "rule-based"
    }
}
