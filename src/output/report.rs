//! Final report rendering
//!
//! The report format is fixed; downstream tooling greps it, so the exact
//! header, blank lines and two-space indent of the extension block all
//! matter.

use crate::stats::StatsSnapshot;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;
use std::time::Duration;

/// Renders the run statistics into the report's fixed textual format
pub fn render_report(
    stats: &StatsSnapshot,
    generated_at: DateTime<Utc>,
    elapsed: Duration,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "=== Scraping Report ===");
    let _ = writeln!(
        out,
        "Date: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    let _ = writeln!(out, "Duration: {}", format_duration(elapsed));
    let _ = writeln!(out);
    let _ = writeln!(out, "Tenants: {}", stats.tenants);
    let _ = writeln!(out, "Activities: {}", stats.activities);
    let _ = writeln!(out, "Files: {}", stats.files);
    let _ = writeln!(out);
    let _ = writeln!(out, "By extension:");
    for (bucket, count) in &stats.by_extension {
        let _ = writeln!(out, "  {}: {}", bucket, count);
    }

    out
}

/// Formats an elapsed duration as `Nm Ss` past the first minute, `Ss` below
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
