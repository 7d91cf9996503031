use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and validates the configuration file at `path`
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Loads the configuration and fingerprints the file it came from
///
/// The hash is the SHA-256 of the raw file content; it goes into the
/// startup log so runs driven by different configurations can be told
/// apart after the fact. The file is read once, so the hash always matches
/// the config that was actually parsed.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    let hash = hex::encode(Sha256::digest(content.as_bytes()));
    Ok((config, hash))
}

fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}
