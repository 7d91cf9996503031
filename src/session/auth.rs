//! Authentication handshake and session factory
//!
//! The handshake runs once per process: credentials are POSTed to the
//! platform login endpoint and the session cookie(s) are captured from the
//! response. Every worker then derives its own session from that shared
//! captured credential, each with a freshly seeded cookie jar.

use crate::config::Config;
use crate::session::{HttpSession, Session, SessionError, SessionFactory, NAVIGATION_TIMEOUT};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Submits credentials and captures the platform session cookie
pub struct Authenticator {
    client: Client,
    base_url: Url,
    login: String,
    password: String,
}

impl Authenticator {
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            SessionError::Auth(format!("invalid base URL {}: {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(NAVIGATION_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SessionError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            login: config.login.clone(),
            password: config.password.clone(),
        })
    }

    /// Performs the login handshake and returns the captured cookies as
    /// `name=value` pairs
    pub async fn capture_cookies(&self) -> Result<Vec<String>, SessionError> {
        let login_url = self
            .base_url
            .join("/login")
            .map_err(|e| SessionError::Auth(e.to_string()))?;

        tracing::info!("authenticating as {}", self.login);
        let response = self
            .client
            .post(login_url)
            .form(&[
                ("login", self.login.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SessionError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SessionError::Auth(format!(
                "login rejected with HTTP {}",
                response.status()
            )));
        }

        let cookies: Vec<String> = response
            .cookies()
            .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
            .collect();

        if cookies.is_empty() {
            return Err(SessionError::Auth(
                "no session cookie in login response".to_string(),
            ));
        }

        Ok(cookies)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Session factory backed by the captured login cookie
pub struct HttpSessionFactory {
    base_url: Url,
    cookies: Vec<String>,
    headless: bool,
}

impl HttpSessionFactory {
    /// Authenticates against the platform and returns a factory all workers
    /// can derive their sessions from
    pub async fn connect(config: &Config) -> Result<Self, SessionError> {
        let authenticator = Authenticator::new(config)?;
        let cookies = authenticator.capture_cookies().await?;
        tracing::info!("captured {} session cookie(s)", cookies.len());

        Ok(Self {
            base_url: authenticator.base_url().clone(),
            cookies,
            headless: config.headless,
        })
    }
}

#[async_trait]
impl SessionFactory for HttpSessionFactory {
    async fn new_authenticated_session(&self) -> Result<Box<dyn Session>, SessionError> {
        let jar = Arc::new(Jar::default());
        for cookie in &self.cookies {
            jar.add_cookie_str(cookie, &self.base_url);
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .timeout(NAVIGATION_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| SessionError::Client(e.to_string()))?;

        Ok(Box::new(HttpSession::new(
            client,
            self.base_url.clone(),
            !self.headless,
        )))
    }
}
