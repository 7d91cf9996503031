//! Run statistics aggregation
//!
//! A single [`RunStats`] is created at run start, shared by reference with
//! every worker, mutated through atomic counters (plus one mutex-guarded
//! histogram), and read once at run end by the report generator. Together
//! with the visited set it is the only state shared across workers.

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Histogram bucket used for files without an extension
pub const NO_EXTENSION: &str = "(no ext)";

/// Mutable aggregate counters for one mirror run
#[derive(Debug, Default)]
pub struct RunStats {
    tenants: AtomicU64,
    activities: AtomicU64,
    files: AtomicU64,
    work_done: AtomicU64,
    work_total: AtomicU64,
    by_extension: Mutex<HashMap<String, u64>>,
}

/// Point-in-time copy of the counters, taken once at run end
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub tenants: u64,
    pub activities: u64,
    pub files: u64,
    /// Extension histogram, descending by count (ascending by name on ties)
    pub by_extension: Vec<(String, u64)>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one discovered tenant
    pub fn add_tenant(&self) {
        self.tenants.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one visited activity entry
    pub fn add_activity(&self) {
        self.activities.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one successfully downloaded file and buckets its extension
    pub fn record_file(&self, name: &str) {
        self.files.fetch_add(1, Ordering::Relaxed);
        let bucket = extension_bucket(name);
        let mut histogram = self.by_extension.lock().unwrap();
        *histogram.entry(bucket).or_insert(0) += 1;
    }

    /// Sets the total number of root tasks the progress line reports against
    pub fn set_work_total(&self, total: u64) {
        self.work_total.store(total, Ordering::Relaxed);
    }

    /// Records the completion of one root task
    pub fn finish_root(&self) {
        self.work_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Rewrites the live progress line on stdout
    ///
    /// Called on every completed download and every finished root task.
    pub fn print_progress(&self) {
        print!(
            "\r[{}/{}] {} files downloaded",
            self.work_done.load(Ordering::Relaxed),
            self.work_total.load(Ordering::Relaxed),
            self.files.load(Ordering::Relaxed)
        );
        let _ = std::io::stdout().flush();
    }

    /// Takes a snapshot of all counters for the report
    pub fn snapshot(&self) -> StatsSnapshot {
        let histogram = self.by_extension.lock().unwrap();
        let mut by_extension: Vec<(String, u64)> =
            histogram.iter().map(|(k, v)| (k.clone(), *v)).collect();
        by_extension.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        StatsSnapshot {
            tenants: self.tenants.load(Ordering::Relaxed),
            activities: self.activities.load(Ordering::Relaxed),
            files: self.files.load(Ordering::Relaxed),
            by_extension,
        }
    }
}

/// Maps a file name to its histogram bucket
///
/// The bucket is the lower-cased extension with a leading dot, or the
/// `(no ext)` sentinel when the name has no extension.
pub fn extension_bucket(name: &str) -> String {
    match std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_lowercase()),
        _ => NO_EXTENSION.to_string(),
    }
}
