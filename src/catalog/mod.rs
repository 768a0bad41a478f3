pub mod models;
pub mod repository;

pub use models::Product;
pub use repository::{CatalogError, CatalogQuery, CatalogRepository, InMemoryCatalog, PriceRange};
