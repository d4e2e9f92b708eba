#![deny(missing_docs)]

//! A fixed-size worker thread pool with a FIFO job queue.
//!
//! Jobs are submitted to a [`SharedQueueThreadPool`] and executed
//! asynchronously by one of its long-lived worker threads. Jobs are
//! dequeued in submission order; completion order across workers is
//! not guaranteed. Shutdown stops admission, wakes every idle worker
//! and joins them all before the queue is released.

mod error;
mod fatal;
mod job;
/// Fixed-size thread pool and its job queue.
pub mod thread_pool;

pub use error::{PoolError, Result};
pub use job::Job;
pub use thread_pool::{PoolConfig, SharedQueueThreadPool, ThreadPool};
