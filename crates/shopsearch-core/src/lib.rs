//! Shared foundation for the shopsearch workspace: process configuration,
//! the canonical product model, and affiliate URL tagging.

mod affiliate;
mod app_config;
mod config;
mod product;

pub use affiliate::AffiliateTags;
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{Product, Source};

use thiserror::Error;

/// Errors produced while loading process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
