//! Worker pool with atomic task claiming
//!
//! Root tasks sit in a [`TaskQueue`]; `min(concurrency, |tasks|)` worker
//! futures each claim the next unclaimed index and run their task to
//! completion before claiming another. No task is claimed twice and the
//! pool only returns once every worker has drained out.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An ordered sequence of tasks claimed by atomic index increment
pub struct TaskQueue<T> {
    tasks: Vec<T>,
    next: AtomicUsize,
}

impl<T> TaskQueue<T> {
    pub fn new(tasks: Vec<T>) -> Self {
        Self {
            tasks,
            next: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Claims the next unclaimed task; each task is handed out exactly once
    pub fn claim(&self) -> Option<(usize, &T)> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.tasks.get(index).map(|task| (index, task))
    }

    /// Number of workers to spawn for the requested concurrency
    pub fn worker_count(&self, concurrency: usize) -> usize {
        concurrency.max(1).min(self.tasks.len())
    }
}

/// Runs `count` worker futures concurrently and waits for all of them
///
/// Workers are expected to loop over [`TaskQueue::claim`] and swallow their
/// own task failures; the pool imposes no ordering across workers.
pub async fn run_workers<F, Fut>(count: usize, worker: F)
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = ()>,
{
    futures::future::join_all((0..count).map(worker)).await;
}
