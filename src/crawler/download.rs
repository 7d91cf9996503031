//! Best-effort file downloading
//!
//! Given the platform's flakiness, losing an occasional file is preferable
//! to stalling the crawl: every failure in here is logged at warn level and
//! dropped, with no retry and no partial file left behind. Only successful
//! downloads touch the counters.

use crate::crawler::visit::CrawlContext;
use crate::session::{FileEntry, Session};
use std::path::{Path, PathBuf};

/// Entries whose name contains this fragment (case-insensitive) are never
/// scheduled for download
pub const EXCLUDED_NAME_FRAGMENT: &str = "dyslexic";

/// Checks the name-exclusion rule
pub fn is_excluded(name: &str) -> bool {
    name.to_lowercase().contains(EXCLUDED_NAME_FRAGMENT)
}

/// Rejects names that would resolve outside the destination directory
fn is_unsafe_name(name: &str) -> bool {
    name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\'])
}

/// Downloads every file exposed by the currently loaded page into `dir`
pub async fn download_all(session: &mut dyn Session, ctx: &CrawlContext, dir: &Path) {
    let entries = match session.extract_file_entries().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("file enumeration failed in {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries {
        if is_unsafe_name(&entry.name) {
            tracing::warn!("skipping unsafe file name {:?}", entry.name);
            continue;
        }
        if is_excluded(&entry.name) {
            tracing::debug!("excluding {} by name rule", entry.name);
            continue;
        }

        match download_one(&mut *session, &entry, dir).await {
            Ok(()) => {
                ctx.stats.record_file(&entry.name);
                ctx.stats.print_progress();
            }
            Err(e) => {
                tracing::warn!("download failed for {}: {}", entry.name, e);
            }
        }
    }
}

/// Fetches one file through the authenticated session and writes it out
async fn download_one(
    session: &mut dyn Session,
    entry: &FileEntry,
    dir: &Path,
) -> crate::Result<()> {
    let bytes = session.fetch(&entry.link).await?;
    let destination = dir.join(&entry.name);
    write_atomic(&destination, &bytes).await?;
    tracing::debug!("wrote {} ({} bytes)", destination.display(), bytes.len());
    Ok(())
}

/// Writes bytes via a scratch name and a rename so a failed write never
/// leaves a partial file at the destination
async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut scratch = path.as_os_str().to_owned();
    scratch.push(".part");
    let scratch = PathBuf::from(scratch);

    if let Err(e) = tokio::fs::write(&scratch, bytes).await {
        let _ = tokio::fs::remove_file(&scratch).await;
        return Err(e);
    }
    tokio::fs::rename(&scratch, path).await
}
