//! Fail-fast handling for synchronization failures.
//!
//! A poisoned lock or a failed join means a worker died while the pool's
//! shared state was mid-update. Nothing downstream can trust that state,
//! so the whole process is terminated.

use std::fmt::Display;
use std::process;
use std::sync::{Condvar, Mutex, MutexGuard};

use log::error;

/// Code reported for failures that carry no OS error number.
const NO_OS_CODE: i32 = -1;

/// Reports the failed operation and terminates the process.
pub(crate) fn die(op: &str, code: i32, message: &dyn Display) -> ! {
    let line = format!("{op} failed ({code}; {message})");
    error!("{}", line);
    eprintln!("ERROR: {line}");
    process::exit(1);
}

/// Acquires `mutex`, terminating the process if it is poisoned.
pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(e) => die(&format!("lock of {what}"), NO_OS_CODE, &e),
    }
}

/// Blocks on `cond`, terminating the process if the reacquired lock is poisoned.
pub(crate) fn wait<'a, T>(cond: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    match cond.wait(guard) {
        Ok(guard) => guard,
        Err(e) => die("condition wait", NO_OS_CODE, &e),
    }
}

/// Reports a worker that could not be joined.
pub(crate) fn die_join(name: &str) -> ! {
    die(
        &format!("join of {name}"),
        NO_OS_CODE,
        &"worker thread terminated abnormally",
    )
}
