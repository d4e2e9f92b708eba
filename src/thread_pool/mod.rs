use crate::Result;

/// A thread pool for executing jobs concurrently.
///
/// Implementors manage a fixed set of worker threads and distribute
/// incoming jobs across them.
pub trait ThreadPool {
    /// Creates a new thread pool with the given number of threads.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created (e.g., a size of
    /// zero, or a worker thread that fails to start).
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Spawns a function into the thread pool.
    ///
    /// The function will be executed by one of the threads in the pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Rejected` once the pool is shutting down.
    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static;
}

mod queue;
mod shared_queue;
mod worker;

pub use self::shared_queue::SharedQueueThreadPool;

/// Default prefix for worker thread names.
const DEFAULT_NAME_PREFIX: &str = "pool-worker";

/// Configuration for a [`SharedQueueThreadPool`].
///
/// The worker count is fixed for the lifetime of the pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    threads: u32,
    name_prefix: String,
    stack_size: Option<usize>,
}

impl PoolConfig {
    /// Creates a configuration for a pool of `threads` workers.
    pub fn new(threads: u32) -> Self {
        PoolConfig {
            threads,
            name_prefix: DEFAULT_NAME_PREFIX.to_owned(),
            stack_size: None,
        }
    }

    /// Sets the prefix of worker thread names. Workers are named
    /// `"{prefix}-{id}"`.
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Sets the stack size, in bytes, of each worker thread.
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Returns the configured number of workers.
    pub fn threads(&self) -> u32 {
        self.threads
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig::new(num_cpus::get() as u32)
    }
}
