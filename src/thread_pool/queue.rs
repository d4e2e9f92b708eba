use std::collections::VecDeque;
use std::sync::Mutex;

use crate::fatal;
use crate::Job;

/// An unbounded FIFO of pending jobs.
///
/// The deque is only ever touched under the queue's own lock, and its
/// length is the job count, so the two can never disagree. None of the
/// operations wait for items to appear; blocking is layered on top by
/// the pool.
#[derive(Debug, Default)]
pub(crate) struct JobQueue {
    jobs: Mutex<VecDeque<Job>>,
}

impl JobQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a job to the tail.
    pub(crate) fn push(&self, job: Job) {
        self.lock().push_back(job);
    }

    /// Removes and returns the head, or `None` if the queue is empty.
    pub(crate) fn pop(&self) -> Option<Job> {
        self.lock().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Drops every pending job without running it and returns how many
    /// were dropped.
    ///
    /// Jobs are dropped after the lock is released, so a payload whose
    /// destructor touches the pool cannot deadlock against the queue.
    pub(crate) fn drain_and_discard(&self) -> usize {
        let discarded: Vec<Job> = self.lock().drain(..).collect();
        discarded.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Job>> {
        fatal::lock(&self.jobs, "job queue")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording(log: &Arc<Mutex<Vec<usize>>>, id: usize) -> Job {
        let log = log.clone();
        Job::new(move || log.lock().unwrap().push(id))
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let queue = JobQueue::new();
        assert!(queue.pop().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn pops_in_push_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let queue = JobQueue::new();
        for id in 0..5 {
            queue.push(recording(&log, id));
        }
        assert_eq!(queue.len(), 5);

        while let Some(job) = queue.pop() {
            job.run();
        }

        assert_eq!(queue.len(), 0);
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn interleaved_push_pop_keeps_count() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let queue = JobQueue::new();
        queue.push(recording(&log, 1));
        queue.push(recording(&log, 2));
        queue.pop().unwrap().run();
        queue.push(recording(&log, 3));

        assert_eq!(queue.len(), 2);
        queue.pop().unwrap().run();
        queue.pop().unwrap().run();
        assert!(queue.pop().is_none());
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn drain_discards_without_running() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let queue = JobQueue::new();
        for id in 0..3 {
            queue.push(recording(&log, id));
        }

        assert_eq!(queue.drain_and_discard(), 3);
        assert_eq!(queue.len(), 0);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(queue.drain_and_discard(), 0);
    }

    #[test]
    fn discarded_payloads_are_dropped() {
        let payload = Arc::new(());
        let queue = JobQueue::new();
        let held = payload.clone();
        queue.push(Job::new(move || drop(held)));
        assert_eq!(Arc::strong_count(&payload), 2);

        queue.drain_and_discard();
        assert_eq!(Arc::strong_count(&payload), 1);
    }
}
