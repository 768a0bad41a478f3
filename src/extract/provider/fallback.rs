use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::rule_based::RuleBasedProvider;
use super::{ConstraintProvider, ProviderError};
use crate::extract::models::Constraints;
use crate::lexicon::Lexicon;

/// Wraps a primary (typically remote) provider with the rule-based extractor
/// as fallback. The fallback is infallible, so extraction through this
/// provider never fails while fallback is enabled.
pub struct ProviderWithFallback {
    primary: Arc<dyn ConstraintProvider>,
    fallback: RuleBasedProvider,
    fallback_enabled: bool,

    using_fallback: AtomicBool,
    fallback_count: AtomicUsize,
    primary_failures: AtomicUsize,
}

impl ProviderWithFallback {
    pub fn new(
        primary: Arc<dyn ConstraintProvider>,
        lexicon: Arc<Lexicon>,
        fallback_enabled: bool,
    ) -> Self {
        info!(
            "ProviderWithFallback initialized: primary={}, fallback_enabled={}",
            primary.provider_name(),
            fallback_enabled
        );
        Self {
            primary,
            fallback: RuleBasedProvider::new(lexicon),
            fallback_enabled,
            using_fallback: AtomicBool::new(false),
            fallback_count: AtomicUsize::new(0),
            primary_failures: AtomicUsize::new(0),
        }
    }

    pub fn is_using_fallback(&self) -> bool {
        self.using_fallback.load(Ordering::SeqCst)
    }

    pub fn fallback_count(&self) -> usize {
        self.fallback_count.load(Ordering::SeqCst)
    }

    pub fn primary_failures(&self) -> usize {
        self.primary_failures.load(Ordering::SeqCst)
    }

    pub fn reset_fallback_state(&self) {
        self.using_fallback.store(false, Ordering::SeqCst);
        self.primary_failures.store(0, Ordering::SeqCst);
        info!("Fallback state reset");
    }

    async fn fallback_extract(
        &self,
        query: &str,
        original_error: &ProviderError,
    ) -> Result<Constraints, ProviderError> {
        warn!(
            "Falling back to rule-based extraction due to: {}",
            original_error
        );

        let constraints = self.fallback.extract(query).await?;

        self.using_fallback.store(true, Ordering::SeqCst);
        self.fallback_count.fetch_add(1, Ordering::SeqCst);

        Ok(constraints)
    }
}

#[async_trait]
impl ConstraintProvider for ProviderWithFallback {
    async fn extract(&self, query: &str) -> Result<Constraints, ProviderError> {
        match self.primary.extract(query).await {
            Ok(constraints) => {
                self.using_fallback.store(false, Ordering::SeqCst);
                self.primary_failures.store(0, Ordering::SeqCst);
                Ok(constraints)
            }
            Err(e) => {
                self.primary_failures.fetch_add(1, Ordering::SeqCst);
                warn!(
                    "Primary extraction provider failed ({}x): {}",
                    self.primary_failures.load(Ordering::SeqCst),
                    e
                );

                if self.fallback_enabled {
                    self.fallback_extract(query, &e).await
                } else {
                    Err(e)
                }
            }
        }
    }

    fn provider_name(&self) -> &str {
        if self.using_fallback.load(Ordering::SeqCst) {
            "rule-based (fallback)"
        } else {
            self.primary.provider_name()
        }
    }
}
