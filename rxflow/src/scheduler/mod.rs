//! Schedulers - execution contexts for subscriptions and deliveries
//!
//! A [`Scheduler`] runs units of work, now or later, on threads it owns. `execute` never blocks
//! the caller. Three strategies are provided:
//!
//! - [`ComputationScheduler`]: fixed pool sized to the available CPUs, for CPU-bound work
//! - [`IoScheduler`]: grows a worker per queued unit when none is idle, for blocking work
//! - [`SingleThreadScheduler`]: one worker, strict submission order
//!
//! Scheduler handles are cheap to clone; clones share the same execution context.

mod computation;
mod io;
mod pool;
mod single;

pub use computation::ComputationScheduler;
pub use io::IoScheduler;
pub use single::SingleThreadScheduler;

use crate::error::RxError;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A unit of work submitted to a scheduler
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// Execution context abstraction
pub trait Scheduler: Send + Sync {
    /// Schedule `work` for execution without blocking the caller
    fn execute(&self, work: Work);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn execute(&self, work: Work) {
        (**self).execute(work)
    }
}

/// Run a unit of work, keeping a panic from tearing down the worker thread
pub(crate) fn run_guarded(work: Work) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(work)) {
        let error = RxError::from_panic(payload);
        tracing::warn!("Scheduled work panicked: {}", error);
    }
}
