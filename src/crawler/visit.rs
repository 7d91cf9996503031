//! Recursive tree traversal
//!
//! `visit` descends the content tree one node at a time: navigate, classify,
//! then recurse (graph), enumerate-and-download (list) or download in place
//! (leaf). The visited set makes each URL load at most once per run, and
//! every failure is contained to the node or sibling it happened on.

use crate::crawler::classify::{classify, PageShape};
use crate::crawler::download;
use crate::session::{ListEntry, Session};
use crate::slug::normalize;
use crate::stats::RunStats;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

/// Per-run state shared by every worker
///
/// The visited set and the stats aggregator are the only cross-worker
/// mutable state in the whole run; neither lock is ever held across an
/// await point.
#[derive(Debug, Default)]
pub struct CrawlContext {
    visited: Mutex<HashSet<String>>,
    pub stats: RunStats,
}

impl CrawlContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as visited; returns false when it already was
    pub fn mark_visited(&self, url: &str) -> bool {
        self.visited.lock().unwrap().insert(url.to_string())
    }
}

/// Visits one node of the content tree
///
/// Idempotent per URL within a run. Navigation failure aborts this node
/// only; the caller's siblings keep going. Boxed because the graph branch
/// recurses.
pub fn visit<'a>(
    session: &'a mut dyn Session,
    ctx: &'a CrawlContext,
    url: &'a str,
    dir: &'a Path,
    depth: u32,
) -> BoxFuture<'a, crate::Result<()>> {
    async move {
        if !ctx.mark_visited(url) {
            tracing::debug!("already visited {}, skipping", url);
            return Ok(());
        }

        if let Err(e) = session.goto(url).await {
            tracing::warn!("navigation failed for {}: {}", url, e);
            return Ok(());
        }

        match classify(&mut *session).await? {
            PageShape::Graph(nodes) => {
                tracing::debug!(
                    "{} is a graph page with {} node(s) at depth {}",
                    url,
                    nodes.len(),
                    depth
                );
                for node in nodes {
                    let child_dir = dir.join(normalize(&node.label));
                    if let Err(e) = tokio::fs::create_dir_all(&child_dir).await {
                        tracing::warn!("cannot create {}: {}", child_dir.display(), e);
                        continue;
                    }
                    if let Err(e) =
                        visit(&mut *session, ctx, &node.link, &child_dir, depth + 1).await
                    {
                        tracing::warn!("graph child {} failed: {}", node.label, e);
                    }
                }
            }
            PageShape::List(entries) => {
                tracing::debug!("{} is a list page with {} entr(ies)", url, entries.len());
                for entry in entries {
                    if let Err(e) = visit_activity(&mut *session, ctx, &entry, dir).await {
                        tracing::warn!("activity {} failed: {}", entry.name, e);
                    }
                }
            }
            PageShape::LeafFiles => {
                tracing::debug!("{} is a file container", url);
                if let Err(e) = tokio::fs::create_dir_all(dir).await {
                    tracing::warn!("cannot create {}: {}", dir.display(), e);
                    return Ok(());
                }
                download::download_all(&mut *session, ctx, dir).await;
            }
        }

        Ok(())
    }
    .boxed()
}

/// Handles one sub-activity of a list page
///
/// The activity counter moves before navigation so a later download failure
/// still leaves the entry counted exactly once.
async fn visit_activity(
    session: &mut dyn Session,
    ctx: &CrawlContext,
    entry: &ListEntry,
    dir: &Path,
) -> crate::Result<()> {
    if !ctx.mark_visited(&entry.link) {
        tracing::debug!("already visited {}, skipping", entry.link);
        return Ok(());
    }

    let activity_dir = dir.join(normalize(&entry.name));
    tokio::fs::create_dir_all(&activity_dir).await?;
    ctx.stats.add_activity();

    session.goto(&entry.link).await?;
    download::download_all(session, ctx, &activity_dir).await;
    Ok(())
}
