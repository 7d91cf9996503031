//! Scripted session fakes shared by the crawler unit tests

use crate::session::{ContentExtractor, FileEntry, GraphNode, ListEntry, Session, SessionError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted page the fake session can navigate to
#[derive(Debug, Default, Clone)]
pub struct FakePage {
    pub graph: Option<Vec<GraphNode>>,
    pub list: Vec<ListEntry>,
    pub files: Vec<FileEntry>,
    /// When set, navigation to this page fails with a timeout
    pub navigation_fails: bool,
}

impl FakePage {
    pub fn graph(nodes: Vec<(&str, &str)>) -> Self {
        Self {
            graph: Some(
                nodes
                    .into_iter()
                    .map(|(label, link)| GraphNode {
                        label: label.to_string(),
                        link: link.to_string(),
                    })
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn list(entries: Vec<(&str, &str)>) -> Self {
        Self {
            list: entries
                .into_iter()
                .map(|(name, link)| ListEntry {
                    name: name.to_string(),
                    link: link.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn files(entries: Vec<(&str, &str)>) -> Self {
        Self {
            files: entries
                .into_iter()
                .map(|(name, link)| FileEntry {
                    name: name.to_string(),
                    link: link.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            navigation_fails: true,
            ..Self::default()
        }
    }
}

/// In-memory [`Session`] driven by a scripted url → page map
#[derive(Default)]
pub struct FakeSession {
    pages: HashMap<String, FakePage>,
    blobs: HashMap<String, Vec<u8>>,
    pub goto_log: Arc<Mutex<Vec<String>>>,
    pub fetch_log: Arc<Mutex<Vec<String>>>,
    current: Option<String>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn with_blob(mut self, url: &str, bytes: &[u8]) -> Self {
        self.blobs.insert(url.to_string(), bytes.to_vec());
        self
    }

    /// Number of navigations recorded for `url`
    pub fn goto_count(&self, url: &str) -> usize {
        self.goto_log
            .lock()
            .unwrap()
            .iter()
            .filter(|visited| visited.as_str() == url)
            .count()
    }

    fn current_page(&self) -> Result<&FakePage, SessionError> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .ok_or(SessionError::NoCurrentPage)
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn goto(&mut self, url: &str) -> Result<(), SessionError> {
        self.goto_log.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some(page) if page.navigation_fails => Err(SessionError::NavigationTimeout {
                url: url.to_string(),
            }),
            Some(_) => {
                self.current = Some(url.to_string());
                Ok(())
            }
            None => Err(SessionError::Navigation {
                url: url.to_string(),
                message: "no such page in script".to_string(),
            }),
        }
    }

    async fn wait_for_marker(&mut self, _timeout: Duration) -> bool {
        self.current.is_some()
    }

    async fn fetch(&mut self, url: &str) -> Result<Vec<u8>, SessionError> {
        self.fetch_log.lock().unwrap().push(url.to_string());

        self.blobs
            .get(url)
            .cloned()
            .ok_or_else(|| SessionError::FetchStatus {
                url: url.to_string(),
                status: 404,
            })
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[async_trait]
impl ContentExtractor for FakeSession {
    async fn extract_graph_nodes(
        &mut self,
        _timeout: Duration,
    ) -> Result<Option<Vec<GraphNode>>, SessionError> {
        Ok(self.current_page()?.graph.clone())
    }

    async fn extract_list_entries(&mut self) -> Result<Vec<ListEntry>, SessionError> {
        Ok(self.current_page()?.list.clone())
    }

    async fn extract_file_entries(&mut self) -> Result<Vec<FileEntry>, SessionError> {
        Ok(self.current_page()?.files.clone())
    }
}
