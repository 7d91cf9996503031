//! Page-shape classification
//!
//! Every visited page resolves to exactly one of three shapes, checked in
//! order: graph first (a graph container whose node links resolve within the
//! graph-node wait), then list enumeration, and leaf-files as the fallback
//! when neither yields entries. Timeout expiry anywhere in here is a
//! classification signal, never a failure.

use crate::session::{
    GraphNode, ListEntry, Session, SessionError, GRAPH_NODE_TIMEOUT, MARKER_TIMEOUT,
};

/// The structural shape of a loaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageShape {
    /// Graph-style layout of child nodes to recurse into
    Graph(Vec<GraphNode>),

    /// Flat list of named sub-activities
    List(Vec<ListEntry>),

    /// No child entries; the page is a file container
    LeafFiles,
}

/// Classifies the currently loaded page
pub async fn classify(session: &mut dyn Session) -> Result<PageShape, SessionError> {
    // Give the page a bounded chance to expose a structural marker; an
    // expired wait still classifies by whichever partial signal is there
    if !session.wait_for_marker(MARKER_TIMEOUT).await {
        tracing::debug!(
            "no structural marker on {}",
            session.current_url().unwrap_or("<none>")
        );
    }

    if let Some(nodes) = session.extract_graph_nodes(GRAPH_NODE_TIMEOUT).await? {
        return Ok(PageShape::Graph(nodes));
    }

    let entries = session.extract_list_entries().await?;
    if entries.is_empty() {
        Ok(PageShape::LeafFiles)
    } else {
        Ok(PageShape::List(entries))
    }
}
