//! Structural extraction from platform markup
//!
//! This file is the whole of the site contract: pages expose either a graph
//! container (`div.progress-map`) whose node anchors carry a label and an
//! `/activity/`-prefixed link, or an activity list (`ul.activity-list`)
//! whose items are sub-activities when they carry the `data-activity`
//! attribute and direct files when they do not. A markup change on the
//! platform invalidates these selectors, not the crawl algorithm.

use crate::session::{FileEntry, GraphNode, ListEntry};
use scraper::{Html, Selector};
use url::Url;

/// Path prefix a graph node link must carry to be accepted
pub const ACTIVITY_PATH_PREFIX: &str = "/activity/";

const GRAPH_CONTAINER: &str = "div.progress-map";
const GRAPH_NODE_LINK: &str = "a.map-node";
const LIST_ITEM: &str = "ul.activity-list li";
const ACTIVITY_MARKER: &str = "data-activity";

/// Checks whether the document carries any of the expected structural markers
pub fn has_structural_marker(html: &str) -> bool {
    let document = Html::parse_document(html);

    for selector in [GRAPH_CONTAINER, LIST_ITEM] {
        if let Ok(selector) = Selector::parse(selector) {
            if document.select(&selector).next().is_some() {
                return true;
            }
        }
    }

    false
}

/// Extracts graph child nodes from the document
///
/// Returns `None` when the page is not a graph page: no container, or a
/// container whose node links never rendered. Anchors without the
/// recognized `/activity/` path prefix are skipped.
pub fn extract_graph_nodes(html: &str, base_url: &Url) -> Option<Vec<GraphNode>> {
    let document = Html::parse_document(html);

    let container_selector = Selector::parse(GRAPH_CONTAINER).ok()?;
    let container = document.select(&container_selector).next()?;

    let node_selector = Selector::parse(GRAPH_NODE_LINK).ok()?;
    let anchors: Vec<_> = container.select(&node_selector).collect();
    if anchors.is_empty() {
        // Container without resolved node links: treat as not-a-graph so an
        // incomplete render cannot halt traversal
        return None;
    }

    let mut nodes = Vec::new();
    for anchor in anchors {
        let href = match anchor.value().attr("href") {
            Some(href) => href.trim(),
            None => continue,
        };
        if !href.starts_with(ACTIVITY_PATH_PREFIX) {
            continue;
        }

        let link = match base_url.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => continue,
        };

        let label = anchor.text().collect::<String>().trim().to_string();
        nodes.push(GraphNode { label, link });
    }

    Some(nodes)
}

/// Extracts named sub-activity entries (items carrying the activity marker)
pub fn extract_list_entries(html: &str, base_url: &Url) -> Vec<ListEntry> {
    select_list_items(html, base_url, true)
        .into_iter()
        .map(|(name, link)| ListEntry { name, link })
        .collect()
}

/// Extracts file entries (items lacking the activity marker)
pub fn extract_file_entries(html: &str, base_url: &Url) -> Vec<FileEntry> {
    select_list_items(html, base_url, false)
        .into_iter()
        .map(|(name, link)| FileEntry { name, link })
        .collect()
}

/// Walks the activity list and keeps items with or without the marker
fn select_list_items(html: &str, base_url: &Url, with_marker: bool) -> Vec<(String, String)> {
    let document = Html::parse_document(html);

    let item_selector = match Selector::parse(LIST_ITEM) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };
    let anchor_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let mut entries = Vec::new();
    for item in document.select(&item_selector) {
        let has_marker = item.value().attr(ACTIVITY_MARKER).is_some();
        if has_marker != with_marker {
            continue;
        }

        let anchor = match item.select(&anchor_selector).next() {
            Some(anchor) => anchor,
            None => continue,
        };
        let href = match anchor.value().attr("href") {
            Some(href) => href.trim(),
            None => continue,
        };
        let link = match base_url.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => continue,
        };

        let name = anchor.text().collect::<String>().trim().to_string();
        entries.push((name, link));
    }

    entries
}
