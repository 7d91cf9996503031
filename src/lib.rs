//! Atelier-Mirror: an authenticated mirror for a hierarchical content platform
//!
//! This crate logs into a content platform, walks its tree of tenants,
//! projects and activities, downloads the files it finds into a matching
//! local directory tree, and renders an aggregate report at the end.

pub mod config;
pub mod crawler;
pub mod output;
pub mod session;
pub mod slug;
pub mod stats;
#[cfg(test)]
pub mod test_support;

use thiserror::Error;

/// Main error type for Atelier-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Atelier-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use session::{
    ContentExtractor, FileEntry, GraphNode, ListEntry, Session, SessionError, SessionFactory,
};
pub use slug::normalize;
pub use stats::RunStats;
