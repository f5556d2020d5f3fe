//! Shared data model and configuration for the LinkLens workspace.

pub mod app_config;
pub mod config;
pub mod platforms;
pub mod tables;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use platforms::{load_platforms, PlatformEntry, PlatformsFile};
pub use types::{
    CanonicalLink, HandleSet, LinkType, Platform, PlatformMetrics, PlatformResult, ProcessedLink,
    RawLink, RunMetadata, SourceContext,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read platforms file {path}: {source}")]
    PlatformsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse platforms file: {0}")]
    PlatformsFileParse(#[from] serde_yaml::Error),

    #[error("platforms file validation failed: {0}")]
    Validation(String),
}
