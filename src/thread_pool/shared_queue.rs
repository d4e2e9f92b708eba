use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use log::{debug, error, warn};

use super::queue::JobQueue;
use super::worker::Worker;
use super::{PoolConfig, ThreadPool};
use crate::fatal;
use crate::{Job, PoolError, Result};

/// State shared between the pool handle and its workers.
///
/// Three locks, each with one job:
/// - `admission` orders submissions against the shutdown flag flip;
/// - `idle` with `wakeup` is the monitor workers sleep on;
/// - the queue's own lock protects only the pending jobs.
///
/// `shutdown` is written only while `admission` is held and read by
/// workers while `idle` is held. It never goes back to `false`.
pub(super) struct Shared {
    pub(super) queue: JobQueue,
    admission: Mutex<()>,
    pub(super) idle: Mutex<()>,
    pub(super) wakeup: Condvar,
    pub(super) shutdown: AtomicBool,
}

impl Shared {
    fn new() -> Self {
        Shared {
            queue: JobQueue::new(),
            admission: Mutex::new(()),
            idle: Mutex::new(()),
            wakeup: Condvar::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Enqueues `job` unless shutdown has begun, then wakes the workers.
    fn admit(&self, job: Job) -> Result<()> {
        {
            let _gate = fatal::lock(&self.admission, "admission mutex");
            if self.shutdown.load(Ordering::SeqCst) {
                return Err(PoolError::Rejected);
            }
            self.queue.push(job);
        }
        self.wake_all();
        Ok(())
    }

    /// Flips the shutdown flag and wakes every waiting worker.
    fn stop(&self) {
        {
            let _gate = fatal::lock(&self.admission, "admission mutex");
            self.shutdown.store(true, Ordering::SeqCst);
        }
        self.wake_all();
    }

    fn wake_all(&self) {
        // A worker holds `idle` from its emptiness check until it is parked
        // on `wakeup`, so passing through the lock here means it is either
        // parked already or has yet to look at the queue.
        drop(fatal::lock(&self.idle, "wait mutex"));
        self.wakeup.notify_all();
    }
}

/// A fixed-size thread pool fed by a single FIFO job queue.
///
/// Workers take jobs in submission order. A job that panics is logged
/// and the worker that ran it keeps serving the queue.
///
/// The pool can be shared between threads (e.g. through an `Arc`);
/// `spawn`, `submit` and `shutdown` all take `&self`. Dropping the pool
/// shuts it down. When that happens inside one of its own jobs, the
/// worker running the job is not joined; it finishes the job and exits
/// on its own.
pub struct SharedQueueThreadPool {
    shared: Arc<Shared>,
    workers: Mutex<Vec<Worker>>,
    size: usize,
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<Self> {
        Self::with_config(PoolConfig::new(threads))
    }

    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(Job::new(job))
    }
}

impl SharedQueueThreadPool {
    /// Creates a pool from `config`.
    ///
    /// Either every worker starts or none is left running: on a spawn
    /// failure the workers started so far are stopped and joined before
    /// the error is returned.
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        Self::start(config, Arc::new(Shared::new()))
    }

    fn start(config: PoolConfig, shared: Arc<Shared>) -> Result<Self> {
        if config.threads == 0 {
            return Err(PoolError::InvalidSize(config.threads));
        }

        let mut workers = Vec::with_capacity(config.threads as usize);

        for id in 0..config.threads {
            match Worker::spawn(id, &config, shared.clone()) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    error!("Failed to start worker {id}: {e}");
                    shared.stop();
                    workers.into_iter().for_each(Worker::join);
                    return Err(PoolError::Spawn(e));
                }
            }
        }

        debug!("Thread pool started with {} workers", workers.len());
        Ok(SharedQueueThreadPool {
            shared,
            size: workers.len(),
            workers: Mutex::new(workers),
        })
    }

    /// Submits a job for execution by one of the workers.
    ///
    /// Returns as soon as the job is queued; it never waits for the job
    /// to run.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Rejected` once shutdown has begun. A rejected
    /// job is dropped without running.
    pub fn submit(&self, job: Job) -> Result<()> {
        self.shared.admit(job)
    }

    /// Stops admitting jobs and blocks until every worker has exited.
    ///
    /// Jobs already queued when shutdown begins are still run. Calling
    /// this again, from any thread, waits for the first call to finish
    /// and then returns.
    pub fn shutdown(&self) {
        self.shared.stop();

        let mut workers = fatal::lock(&self.workers, "worker set");
        if workers.is_empty() {
            return;
        }
        debug!("Shutting down, joining {} workers", workers.len());
        for worker in workers.drain(..) {
            if worker.is_current() {
                // Shutdown from inside a job: this worker exits once the
                // job returns.
                debug!("Shutdown running on a worker, leaving it to exit");
                continue;
            }
            worker.join();
        }

        let discarded = self.shared.queue.drain_and_discard();
        if discarded > 0 {
            warn!("Discarded {discarded} queued jobs at shutdown");
        }
        debug!("Thread pool shut down");
    }

    /// Returns the number of workers the pool was started with.
    pub fn threads(&self) -> usize {
        self.size
    }

    /// Returns the number of jobs waiting to be claimed by a worker.
    pub fn queued(&self) -> usize {
        self.shared.queue.len()
    }

    /// Returns `true` once shutdown has begun.
    pub fn is_shutdown(&self) -> bool {
        self.shared.shutdown.load(Ordering::SeqCst)
    }
}

impl Drop for SharedQueueThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
