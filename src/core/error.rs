use thiserror::Error;

use crate::catalog::CatalogError;
use crate::extract::provider::ProviderError;


#[derive(Error, Debug)]
pub enum ShopLensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Extraction provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}


pub type Result<T> = std::result::Result<T, ShopLensError>;
