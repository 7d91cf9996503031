use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Atelier-Mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Platform account login
    pub login: String,

    /// Platform account password
    pub password: String,

    /// Base URL of the content platform (e.g. "https://platform.example.com")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Directory the mirrored tree and the report are written into
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// Number of concurrent crawl workers
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Headless session mode; non-headless sessions log every navigation
    #[serde(default)]
    pub headless: bool,
}

fn default_concurrency() -> usize {
    4
}
