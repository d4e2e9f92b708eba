use std::fmt;

/// A unit of deferred work.
///
/// A job owns everything it needs to run. Data shared with the submitter
/// must be passed in a form the submitter keeps alive independently,
/// such as an `Arc`. The pool never inspects the payload.
pub struct Job {
    task: Box<dyn FnOnce() + Send + 'static>,
}

impl Job {
    /// Creates a job from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Job { task: Box::new(f) }
    }

    /// Creates a job from an entry point and the argument it is called with.
    pub fn with_payload<P>(entry: fn(P), payload: P) -> Self
    where
        P: Send + 'static,
    {
        Job::new(move || entry(payload))
    }

    /// Runs the job to completion, consuming it.
    pub fn run(self) {
        (self.task)()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job").finish_non_exhaustive()
    }
}
