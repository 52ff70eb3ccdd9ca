//! Fixed-size worker pool shared by the computation and single-thread schedulers

use super::{Work, run_guarded};
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;

/// Fixed set of worker threads draining one FIFO queue
///
/// Workers exit once every handle to the pool is dropped and the queue is empty, so work
/// submitted before the last handle went away still runs.
#[derive(Clone)]
pub(crate) struct WorkerPool {
    sender: mpsc::UnboundedSender<Work>,
    name: Arc<str>,
    threads: usize,
}

impl WorkerPool {
    pub(crate) fn spawn(name: &str, threads: usize) -> Result<Self> {
        let (sender, receiver) = mpsc::unbounded_channel::<Work>();
        let receiver = Arc::new(Mutex::new(receiver));

        for index in 0..threads {
            let receiver = Arc::clone(&receiver);
            let thread_name = if threads == 1 {
                name.to_string()
            } else {
                format!("{}-{}", name, index)
            };

            thread::Builder::new()
                .name(thread_name)
                .spawn(move || worker_loop(receiver))?;
        }

        tracing::debug!("Started worker pool {} with {} threads", name, threads);

        Ok(Self {
            sender,
            name: Arc::from(name),
            threads,
        })
    }

    pub(crate) fn submit(&self, work: Work) {
        if self.sender.send(work).is_err() {
            tracing::error!("Worker pool {} has no live workers; work dropped", self.name);
        }
    }

    pub(crate) fn threads(&self) -> usize {
        self.threads
    }
}

fn worker_loop(receiver: Arc<Mutex<mpsc::UnboundedReceiver<Work>>>) {
    loop {
        // Only one idle worker waits on the channel at a time; the rest wait for the lock
        let next = receiver.lock().blocking_recv();
        match next {
            Some(work) => run_guarded(work),
            None => break,
        }
    }

    tracing::debug!(
        "Worker {} exiting",
        thread::current().name().unwrap_or("unnamed")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc as std_mpsc;
    use std::time::Duration;

    #[test]
    fn test_pool_runs_submitted_work() {
        let pool = WorkerPool::spawn("test-pool", 2).unwrap();
        let (tx, rx) = std_mpsc::channel();

        for i in 0..10 {
            let tx = tx.clone();
            pool.submit(Box::new(move || tx.send(i).unwrap()));
        }

        let mut received: Vec<i32> = (0..10)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        received.sort();
        assert_eq!(received, (0..10).collect::<Vec<_>>());
        assert_eq!(pool.threads(), 2);
    }

    #[test]
    fn test_pool_survives_panicking_work() {
        let pool = WorkerPool::spawn("test-panic", 1).unwrap();
        let (tx, rx) = std_mpsc::channel();

        pool.submit(Box::new(|| panic!("work failed")));
        pool.submit(Box::new(move || tx.send("still alive").unwrap()));

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            "still alive"
        );
    }

    #[test]
    fn test_queued_work_runs_after_pool_dropped() {
        let pool = WorkerPool::spawn("test-drain", 1).unwrap();
        let (tx, rx) = std_mpsc::channel();

        for i in 0..5 {
            let tx = tx.clone();
            pool.submit(Box::new(move || tx.send(i).unwrap()));
        }
        drop(pool);

        let received: Vec<i32> = (0..5)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        assert_eq!(received, vec![0, 1, 2, 3, 4]);
    }
}
