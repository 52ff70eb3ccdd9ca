//! Sequential scheduler

use super::pool::WorkerPool;
use super::{Scheduler, Work};
use crate::config::SchedulerConfig;
use crate::error::Result;

/// Scheduler with exactly one worker thread
///
/// Units of work run one at a time, strictly in submission order.
#[derive(Clone)]
pub struct SingleThreadScheduler {
    pool: WorkerPool,
}

impl SingleThreadScheduler {
    /// # Panics
    /// Panics if the worker thread cannot be spawned; see [`with_config`](Self::with_config).
    pub fn new() -> Self {
        Self::with_config(&SchedulerConfig::default())
            .unwrap_or_else(|e| panic!("failed to start single-thread scheduler: {}", e))
    }

    pub fn with_config(config: &SchedulerConfig) -> Result<Self> {
        let name = format!("{}-single", config.thread_name_prefix);
        let pool = WorkerPool::spawn(&name, 1)?;
        Ok(Self { pool })
    }
}

impl Default for SingleThreadScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SingleThreadScheduler {
    fn execute(&self, work: Work) {
        self.pool.submit(work);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_work_runs_in_submission_order_on_one_thread() {
        let scheduler = SingleThreadScheduler::new();
        let (tx, rx) = mpsc::channel();

        for i in 0..100 {
            let tx = tx.clone();
            scheduler.execute(Box::new(move || {
                tx.send((i, std::thread::current().id())).unwrap();
            }));
        }

        let results: Vec<_> = (0..100)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();

        let order: Vec<i32> = results.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, (0..100).collect::<Vec<_>>());

        let first_thread = results[0].1;
        assert!(results.iter().all(|(_, id)| *id == first_thread));
        assert_ne!(first_thread, std::thread::current().id());
    }

    #[test]
    fn test_worker_thread_is_named() {
        let config = SchedulerConfig::new().with_thread_name_prefix("ui");
        let scheduler = SingleThreadScheduler::with_config(&config).unwrap();
        let (tx, rx) = mpsc::channel();

        scheduler.execute(Box::new(move || {
            tx.send(std::thread::current().name().map(str::to_string))
                .unwrap();
        }));

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("ui-single"));
    }
}
