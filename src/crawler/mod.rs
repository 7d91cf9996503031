//! Crawl orchestration
//!
//! `run_mirror` ties the run together: authenticate once, enumerate the
//! root tasks, fan them out over the worker pool, then render the report.
//! Workers share nothing but the crawl context (visited set + stats); each
//! owns its session and crawls its claimed roots strictly sequentially.

mod classify;
mod discover;
mod download;
mod pool;
mod visit;

pub use classify::{classify, PageShape};
pub use discover::{discover_roots, RootTask};
pub use download::{download_all, is_excluded, EXCLUDED_NAME_FRAGMENT};
pub use pool::{run_workers, TaskQueue};
pub use visit::{visit, CrawlContext};

use crate::config::Config;
use crate::output::render_report;
use crate::session::{HttpSessionFactory, SessionFactory};

/// Runs the full mirror operation against the configured platform
///
/// # Flow
///
/// 1. Authenticate and capture the session cookie
/// 2. Enumerate tenants and root tasks with a discovery session
/// 3. Run `min(concurrency, |roots|)` workers over the task queue,
///    one authenticated session per worker
/// 4. Write `report.txt` into the output directory and echo it
pub async fn run_mirror(config: Config) -> crate::Result<()> {
    let started = std::time::Instant::now();

    tokio::fs::create_dir_all(&config.output_dir).await?;

    let factory = HttpSessionFactory::connect(&config).await?;
    let ctx = CrawlContext::new();

    // Enumeration: tenants and their top-level activities become root tasks
    let mut discovery_session = factory.new_authenticated_session().await?;
    let roots = discover_roots(discovery_session.as_mut(), &ctx, &config.output_dir).await?;
    drop(discovery_session);

    ctx.stats.set_work_total(roots.len() as u64);
    tracing::info!("queued {} root task(s)", roots.len());

    let queue = TaskQueue::new(roots);
    let workers = queue.worker_count(config.concurrency);
    tracing::info!("starting {} worker(s)", workers);

    {
        let queue = &queue;
        let ctx = &ctx;
        let factory = &factory;
        run_workers(workers, move |worker_id| async move {
            let mut session = match factory.new_authenticated_session().await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("worker {} could not open a session: {}", worker_id, e);
                    return;
                }
            };

            while let Some((index, root)) = queue.claim() {
                tracing::debug!(
                    "worker {} crawling root {} ({})",
                    worker_id,
                    index,
                    root.label
                );
                if let Err(e) = visit(session.as_mut(), ctx, &root.url, &root.directory, 0).await
                {
                    tracing::warn!("root task {} failed: {}", root.label, e);
                }
                ctx.stats.finish_root();
                ctx.stats.print_progress();
            }
            // The session drops here, releasing its connections
        })
        .await;
    }

    // Terminate the progress line before the report goes to stdout
    println!();

    let snapshot = ctx.stats.snapshot();
    let report = render_report(&snapshot, chrono::Utc::now(), started.elapsed());

    let report_path = config.output_dir.join("report.txt");
    tokio::fs::write(&report_path, &report).await?;
    tracing::info!("report written to {}", report_path.display());

    println!("{}", report);
    Ok(())
}
