//! Configuration loading and validation
//!
//! The mirror is driven by a small TOML file carrying the platform
//! credentials, the output directory and the crawl concurrency.

mod parser;
mod types;
mod validation;

pub use parser::{load_config, load_config_with_hash};
pub use types::Config;
pub use validation::validate;
