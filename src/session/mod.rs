//! Authenticated platform sessions
//!
//! The crawler never talks to the platform directly; it goes through the
//! [`Session`] and [`ContentExtractor`] capability traits defined here. The
//! shipped implementation ([`HttpSession`]) drives plain HTTP requests with
//! the captured login cookie, but anything that can load a page and answer
//! the three extraction questions can stand in (the unit tests do exactly
//! that with a scripted fake).

mod auth;
mod extract;
mod http;

pub use auth::{Authenticator, HttpSessionFactory};
pub use extract::{
    extract_file_entries, extract_graph_nodes, extract_list_entries, has_structural_marker,
    ACTIVITY_PATH_PREFIX,
};
pub use http::HttpSession;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single page navigation
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the wait for any structural marker after navigation
pub const MARKER_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on the wait for graph node links to resolve
pub const GRAPH_NODE_TIMEOUT: Duration = Duration::from_secs(15);

/// A child node discovered on a graph-style page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Display label, later normalized into a directory name
    pub label: String,

    /// Absolute URL of the child page
    pub link: String,
}

/// A named sub-activity discovered on a list-style page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Display name, later normalized into a directory name
    pub name: String,

    /// Absolute URL of the sub-activity page
    pub link: String,
}

/// A downloadable file discovered on a leaf page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Display name, used as the destination file name
    pub name: String,

    /// Absolute URL of the file content
    pub link: String,
}

/// Errors raised by the session layer
///
/// All of these are recoverable at the node/file granularity; the crawler
/// logs them and moves on to the next sibling.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Navigation timeout for {url}")]
    NavigationTimeout { url: String },

    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Fetch failed for {url}: HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("No page loaded in session")]
    NoCurrentPage,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Structured extraction from the currently loaded page
///
/// One method per page shape the platform exposes. Implementations answer
/// against whatever document the last successful navigation produced.
#[async_trait]
pub trait ContentExtractor {
    /// Extracts graph child nodes, waiting up to `timeout` for the node
    /// links to resolve
    ///
    /// Returns `Ok(None)` when the page is not a graph page: either no
    /// graph container exists or its node links never resolved within the
    /// timeout. Both degrade to the list/leaf classification path.
    async fn extract_graph_nodes(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Vec<GraphNode>>, SessionError>;

    /// Extracts named sub-activity entries from a list-style page
    async fn extract_list_entries(&mut self) -> Result<Vec<ListEntry>, SessionError>;

    /// Extracts downloadable file entries from a leaf page
    async fn extract_file_entries(&mut self) -> Result<Vec<FileEntry>, SessionError>;
}

/// One authenticated browsing session
///
/// A session holds at most one loaded page at a time; navigation replaces
/// it. Workers own their session exclusively, so all methods take `&mut`.
#[async_trait]
pub trait Session: ContentExtractor + Send {
    /// Navigates to `url` (absolute or relative to the platform base),
    /// bounded by [`NAVIGATION_TIMEOUT`]
    async fn goto(&mut self, url: &str) -> Result<(), SessionError>;

    /// Waits up to `timeout` for any expected structural marker on the
    /// current page
    ///
    /// Expiry is a normal classification signal, not an error, hence the
    /// plain `bool`.
    async fn wait_for_marker(&mut self, timeout: Duration) -> bool;

    /// Fetches raw bytes through the authenticated session (platform
    /// cookies apply)
    async fn fetch(&mut self, url: &str) -> Result<Vec<u8>, SessionError>;

    /// URL of the currently loaded page, if any
    fn current_url(&self) -> Option<&str>;
}

/// Produces authenticated sessions from the shared captured credential
///
/// Called once per worker; each worker owns the session it gets for its
/// whole lifetime and drops it on exit.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn new_authenticated_session(&self) -> Result<Box<dyn Session>, SessionError>;
}
