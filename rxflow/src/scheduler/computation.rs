//! Bounded parallel scheduler for CPU-bound work

use super::pool::WorkerPool;
use super::{Scheduler, Work};
use crate::config::SchedulerConfig;
use crate::error::Result;

/// Scheduler backed by a fixed pool, one worker per available CPU by default
///
/// Work is dequeued in submission order, but runs in parallel, so completion order across
/// units of work is not guaranteed.
#[derive(Clone)]
pub struct ComputationScheduler {
    pool: WorkerPool,
}

impl ComputationScheduler {
    /// Create a scheduler sized to the available parallelism
    ///
    /// # Panics
    /// Panics if the operating system refuses to spawn the worker threads; use
    /// [`with_config`](Self::with_config) to handle that case.
    pub fn new() -> Self {
        Self::with_config(&SchedulerConfig::default())
            .unwrap_or_else(|e| panic!("failed to start computation scheduler: {}", e))
    }

    pub fn with_config(config: &SchedulerConfig) -> Result<Self> {
        config.validate()?;
        let name = format!("{}-computation", config.thread_name_prefix);
        let pool = WorkerPool::spawn(&name, config.computation_threads())?;
        Ok(Self { pool })
    }

    /// Number of worker threads
    pub fn parallelism(&self) -> usize {
        self.pool.threads()
    }
}

impl Default for ComputationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ComputationScheduler {
    fn execute(&self, work: Work) {
        self.pool.submit(work);
    }
}
