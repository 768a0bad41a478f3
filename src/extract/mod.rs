pub mod extractor;
pub mod models;
pub mod patterns;
pub mod provider;

pub use extractor::ConstraintExtractor;
pub use models::{Constraints, QueryText};
pub use patterns::{extract_explicit_price, has_budget_signal, PricePhrase};

pub use crate::lexicon::BudgetTier;
