use serde::{Deserialize, Serialize};

use crate::lexicon::CategoryId;

/// A catalog product. Owned by the external catalog and read-only to the
/// core; the loader deserializes these from a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub rating: f64,
    pub category: CategoryId,
    pub brand: String,
    pub color: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub buy_link: String,
    #[serde(default)]
    pub image_url: String,
}

impl Product {
    /// Lower-cased concatenation of the fields the scorer matches query
    /// tokens against.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.description, self.brand, self.color
        )
        .to_lowercase()
    }
}
