#[cfg(test)]
use std::cell::Cell;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use super::shared_queue::Shared;
use super::PoolConfig;
use crate::fatal;
use crate::Job;

#[cfg(test)]
thread_local! {
    /// Worker id whose start is made to fail on the current thread.
    pub(super) static FAIL_SPAWN_AT: Cell<Option<u32>> = const { Cell::new(None) };
}

/// A started worker thread.
pub(super) struct Worker {
    name: String,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Starts worker `id`, running the worker loop against `shared`.
    pub(super) fn spawn(id: u32, config: &PoolConfig, shared: Arc<Shared>) -> io::Result<Worker> {
        injected_failure(id)?;

        let name = format!("{}-{}", config.name_prefix, id);
        let mut builder = thread::Builder::new().name(name.clone());
        if let Some(bytes) = config.stack_size {
            builder = builder.stack_size(bytes);
        }
        let handle = builder.spawn(move || run(id, &shared))?;
        Ok(Worker { name, handle })
    }

    /// Returns `true` if called from this worker's own thread.
    pub(super) fn is_current(&self) -> bool {
        self.handle.thread().id() == thread::current().id()
    }

    /// Blocks until the worker has exited.
    pub(super) fn join(self) {
        if self.handle.join().is_err() {
            fatal::die_join(&self.name);
        }
    }
}

#[cfg(test)]
fn injected_failure(id: u32) -> io::Result<()> {
    if FAIL_SPAWN_AT.with(|at| at.get() == Some(id)) {
        return Err(io::Error::new(io::ErrorKind::WouldBlock, "injected spawn failure"));
    }
    Ok(())
}

#[cfg(not(test))]
fn injected_failure(_id: u32) -> io::Result<()> {
    Ok(())
}

/// The worker loop: wait for a job, run it, repeat until told to stop.
fn run(id: u32, shared: &Shared) {
    debug!("Worker {id} started");
    while let Some(job) = next_job(shared) {
        execute(id, job);
    }
    debug!("Worker {id}: shutdown observed, exiting");
}

/// Blocks until a job is claimed or the pool is stopping with nothing left.
///
/// The decision is made under the wait mutex, and the job is already
/// removed from the queue when the mutex is released.
fn next_job(shared: &Shared) -> Option<Job> {
    let mut idle = fatal::lock(&shared.idle, "wait mutex");
    loop {
        // Read the flag before popping: every job admitted ahead of the
        // flag flip is then visible to the pop below.
        let stopping = shared.shutdown.load(Ordering::SeqCst);
        if let Some(job) = shared.queue.pop() {
            return Some(job);
        }
        if stopping {
            return None;
        }
        idle = fatal::wait(&shared.wakeup, idle);
    }
}

fn execute(id: u32, job: Job) {
    debug!("Worker {id} executing job");
    // Keep the worker alive so the pool stays at full size.
    if panic::catch_unwind(AssertUnwindSafe(|| job.run())).is_err() {
        error!("Worker {id} job panicked, continuing");
    }
}
