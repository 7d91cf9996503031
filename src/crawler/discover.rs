//! Tenant and root-task enumeration
//!
//! Before the pool starts, one session walks the dashboard to list the
//! account's tenants and each tenant's top-level activities. Every
//! activity becomes one root task: a (URL, destination directory) pair a
//! worker later crawls end to end.

use crate::crawler::visit::CrawlContext;
use crate::session::Session;
use crate::slug::normalize;
use std::path::{Path, PathBuf};

/// One unit of pool work: a top-level activity and where it mirrors to
#[derive(Debug, Clone)]
pub struct RootTask {
    /// Display name of the activity, for logs
    pub label: String,

    /// Absolute URL of the activity page
    pub url: String,

    /// Destination directory (`output/<tenant>/<activity>`)
    pub directory: PathBuf,
}

/// Enumerates tenants and their activities into a flat root-task list
///
/// Counts every discovered tenant; a tenant that cannot be reached or
/// enumerated is logged and skipped, it never aborts discovery.
pub async fn discover_roots(
    session: &mut dyn Session,
    ctx: &CrawlContext,
    output_dir: &Path,
) -> crate::Result<Vec<RootTask>> {
    session.goto("/dashboard").await?;
    let tenants = session.extract_list_entries().await?;
    tracing::info!("discovered {} tenant(s)", tenants.len());

    let mut roots = Vec::new();
    for tenant in tenants {
        ctx.stats.add_tenant();
        let tenant_dir = output_dir.join(normalize(&tenant.name));

        if let Err(e) = session.goto(&tenant.link).await {
            tracing::warn!("tenant {} unreachable: {}", tenant.name, e);
            continue;
        }

        let activities = match session.extract_list_entries().await {
            Ok(activities) => activities,
            Err(e) => {
                tracing::warn!("cannot enumerate tenant {}: {}", tenant.name, e);
                continue;
            }
        };

        for activity in activities {
            roots.push(RootTask {
                directory: tenant_dir.join(normalize(&activity.name)),
                url: activity.link,
                label: activity.name,
            });
        }
    }

    Ok(roots)
}
