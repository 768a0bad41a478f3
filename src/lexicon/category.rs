use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Closed set of catalog categories. Raw strings are resolved into this enum
/// once, at the lexicon boundary; everything downstream switches on the
/// variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CategoryId {
    Apparel,
    Mobiles,
    Electronics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trip() {
        assert_eq!(CategoryId::Apparel.to_string(), "apparel");
        assert_eq!(CategoryId::from_str("mobiles").unwrap(), CategoryId::Mobiles);
        assert!(CategoryId::from_str("groceries").is_err());
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&CategoryId::Electronics).unwrap();
        assert_eq!(json, "\"electronics\"");
        let back: CategoryId = serde_json::from_str("\"apparel\"").unwrap();
        assert_eq!(back, CategoryId::Apparel);
    }
}
