use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a loaded configuration
///
/// # Rules
///
/// - `login` and `password` must be non-empty
/// - `base-url` must parse as an HTTP(S) URL
/// - `output-dir` must be non-empty
/// - `concurrency` must be at least 1
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.login.trim().is_empty() {
        return Err(ConfigError::Validation("login must not be empty".into()));
    }

    if config.password.is_empty() {
        return Err(ConfigError::Validation("password must not be empty".into()));
    }

    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::Validation(format!("base-url is not a valid URL: {}", e)))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got: {}",
            base.scheme()
        )));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output-dir must not be empty".into(),
        ));
    }

    if config.concurrency == 0 {
        return Err(ConfigError::Validation(
            "concurrency must be at least 1".into(),
        ));
    }

    Ok(())
}
