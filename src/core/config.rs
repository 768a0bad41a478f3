use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ShopLensError};
use crate::{
    DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL, DEFAULT_REMOTE_MODEL, DEFAULT_REMOTE_URL,
    DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT,
};


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopLensConfig {

    pub result_limit: usize,
    pub max_result_limit: usize,


    pub remote_provider_enabled: bool,
    pub remote_url: String,
    pub remote_model: String,
    pub remote_api_key: Option<String>,
    pub remote_temperature: f64,
    pub fallback_enabled: bool,


    pub cache_enabled: bool,
    pub cache_size: usize,
    pub cache_ttl_secs: u64,


    pub catalog_path: Option<String>,
    pub lexicon_path: Option<String>,
}

impl ShopLensConfig {
    pub fn new() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
            max_result_limit: MAX_RESULT_LIMIT,

            remote_provider_enabled: false,
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            remote_model: DEFAULT_REMOTE_MODEL.to_string(),
            remote_api_key: None,
            remote_temperature: 0.1,
            fallback_enabled: true,

            cache_enabled: false,
            cache_size: DEFAULT_CACHE_SIZE,
            cache_ttl_secs: DEFAULT_CACHE_TTL,

            catalog_path: None,
            lexicon_path: None,
        }
    }

    /// Result limit actually applied by the pipeline, clamped to the hard cap.
    pub fn effective_result_limit(&self) -> usize {
        self.result_limit.clamp(1, self.max_result_limit.max(1))
    }


    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(limit) = std::env::var("SHOPLENS_RESULT_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.result_limit = limit;
            }
        }
        if let Ok(enabled) = std::env::var("SHOPLENS_REMOTE_PROVIDER") {
            config.remote_provider_enabled = enabled == "1" || enabled.eq_ignore_ascii_case("true");
        }
        if let Ok(url) = std::env::var("SHOPLENS_REMOTE_URL") {
            config.remote_url = url;
        }
        if let Ok(model) = std::env::var("SHOPLENS_REMOTE_MODEL") {
            config.remote_model = model;
        }
        if let Ok(key) = std::env::var("SHOPLENS_REMOTE_API_KEY") {
            config.remote_api_key = Some(key);
        }
        if let Ok(enabled) = std::env::var("SHOPLENS_CACHE") {
            config.cache_enabled = enabled == "1" || enabled.eq_ignore_ascii_case("true");
        }
        if let Ok(path) = std::env::var("SHOPLENS_CATALOG") {
            config.catalog_path = Some(path);
        }
        if let Ok(path) = std::env::var("SHOPLENS_LEXICON") {
            config.lexicon_path = Some(path);
        }

        config
    }

    /// Layered load: file values first, `SHOPLENS_*` environment variables on top.
    pub fn load(path: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SHOPLENS"))
            .build()
            .map_err(|e| ShopLensError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ShopLensError::Config(e.to_string()))
    }
}

impl Default for ShopLensConfig {
    fn default() -> Self {
        Self::new()
    }
}
