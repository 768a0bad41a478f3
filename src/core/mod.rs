pub mod config;
pub mod error;

pub use self::config::ShopLensConfig;
pub use self::error::{Result, ShopLensError};
