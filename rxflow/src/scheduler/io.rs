//! Unbounded scheduler for blocking work

use super::{Scheduler, Work, run_guarded};
use crate::config::SchedulerConfig;
use crate::error::Result;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Scheduler backed by tokio's blocking pool
///
/// A new worker is started whenever work is queued and no worker is idle; idle workers are
/// reused and retired after the configured keep-alive. Suited to blocking I/O.
///
/// Workers are only capped by `io_max_threads` (512 by default), so a sustained stream of
/// long-running work can grow the pool to that many OS threads. There is no backpressure.
///
/// Unlike a truly unbounded cached pool, work submitted while every capped worker is busy waits
/// in the queue. Units that block on each other can deadlock once the cap is reached; raise
/// `io_max_threads` for such workloads.
#[derive(Clone)]
pub struct IoScheduler {
    context: Arc<IoContext>,
}

/// Owns the runtime whose blocking pool runs the work
struct IoContext {
    runtime: Option<Runtime>,
}

impl Drop for IoContext {
    fn drop(&mut self) {
        // May run on one of this runtime's own workers, where a blocking shutdown would panic
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
            tracing::debug!("IO scheduler shut down");
        }
    }
}

impl IoScheduler {
    /// # Panics
    /// Panics if the runtime cannot be built; see [`with_config`](Self::with_config).
    pub fn new() -> Self {
        Self::with_config(&SchedulerConfig::default())
            .unwrap_or_else(|e| panic!("failed to start IO scheduler: {}", e))
    }

    pub fn with_config(config: &SchedulerConfig) -> Result<Self> {
        config.validate()?;

        let runtime = Builder::new_current_thread()
            .thread_name(format!("{}-io", config.thread_name_prefix))
            .max_blocking_threads(config.io_max_threads)
            .thread_keep_alive(config.io_keep_alive())
            .build()?;

        tracing::debug!(
            "Started IO scheduler (max {} workers, keep-alive {:?})",
            config.io_max_threads,
            config.io_keep_alive()
        );

        Ok(Self {
            context: Arc::new(IoContext {
                runtime: Some(runtime),
            }),
        })
    }
}

impl Default for IoScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for IoScheduler {
    fn execute(&self, work: Work) {
        let Some(runtime) = self.context.runtime.as_ref() else {
            return;
        };

        // Queued work keeps the runtime alive after the last scheduler handle is dropped
        let context = Arc::clone(&self.context);
        runtime.spawn_blocking(move || {
            run_guarded(work);
            drop(context);
        });
    }
}
