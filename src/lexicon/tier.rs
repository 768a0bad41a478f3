use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Coarse price band used when the query carries no explicit number.
/// `Specific` marks constraints whose ceiling came from an explicit price.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BudgetTier {
    #[default]
    Low,
    Medium,
    High,
    Specific,
}
