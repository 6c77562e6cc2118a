//! Configuration loading and types for readyblog.
//!
//! - Type definitions for config structures (`types`)
//! - Layered loading from file, environment and CLI overrides (`load`)

mod load;
mod types;

use std::path::PathBuf;

pub use load::Overrides;
pub use types::{BlogConfig, Branding};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "readyblog.yaml";

/// Prefix for environment variable overrides (`READYBLOG_BASE_URL`, ...).
pub const ENV_PREFIX: &str = "READYBLOG";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config path is not valid UTF-8: {0}")]
    EncodePath(PathBuf),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),
}
