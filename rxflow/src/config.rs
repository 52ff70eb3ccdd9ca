//! Scheduler configuration

use crate::error::{Result, RxError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration shared by the scheduler strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Worker count of the computation pool (defaults to the available parallelism)
    pub computation_threads: Option<usize>,
    /// Upper bound on live IO workers
    pub io_max_threads: usize,
    /// How long an idle IO worker is kept before it is retired, in milliseconds
    pub io_keep_alive_ms: u64,
    /// Prefix for worker thread names
    pub thread_name_prefix: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            computation_threads: None,
            io_max_threads: 512,
            io_keep_alive_ms: 60_000,
            thread_name_prefix: "rxflow".to_string(),
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SchedulerConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the computation pool size
    pub fn with_computation_threads(mut self, threads: usize) -> Self {
        self.computation_threads = Some(threads);
        self
    }

    /// Set the IO worker limit
    pub fn with_io_max_threads(mut self, threads: usize) -> Self {
        self.io_max_threads = threads;
        self
    }

    /// Set the IO worker keep-alive
    pub fn with_io_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.io_keep_alive_ms = keep_alive.as_millis() as u64;
        self
    }

    /// Set the worker thread name prefix
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Reject configurations no scheduler can be built from
    pub fn validate(&self) -> Result<()> {
        if self.computation_threads == Some(0) {
            return Err(RxError::Config(
                "computation_threads must be greater than zero".to_string(),
            ));
        }
        if self.io_max_threads == 0 {
            return Err(RxError::Config(
                "io_max_threads must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolved computation pool size
    pub fn computation_threads(&self) -> usize {
        self.computation_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn io_keep_alive(&self) -> Duration {
        Duration::from_millis(self.io_keep_alive_ms)
    }
}
