#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))] // This is all test code, no need to test it.

//! Private helpers for testing and examples in the pool packages.

use std::sync::{Barrier, mpsc};
use std::thread;
use std::time::Duration;

const WATCHDOG_TIMEOUT: Duration = Duration::from_secs(10);
const WATCHDOG_TIMEOUT_MIRI: Duration = Duration::from_secs(60);

/// Runs a test body on a separate thread and fails the test if it does not finish in time.
///
/// Concurrency tests that deadlock would otherwise hang the whole test run. The timeout is
/// 10 seconds, or 60 seconds under Miri where synchronization is much slower.
///
/// When the `MUTATION_TESTING` environment variable is set to "1", the body runs directly on
/// the calling thread so that mutation testing can detect hanging mutants on its own.
///
/// # Panics
///
/// Panics if the body exceeds the timeout. Panics from the body are propagated unchanged.
///
/// # Example
///
/// ```rust
/// use testing::with_watchdog;
///
/// let answer = with_watchdog(|| 6 * 7);
/// assert_eq!(answer, 42);
/// ```
pub fn with_watchdog<F, R>(body: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if std::env::var("MUTATION_TESTING").as_deref() == Ok("1") {
        return body();
    }

    let timeout = if cfg!(miri) {
        WATCHDOG_TIMEOUT_MIRI
    } else {
        WATCHDOG_TIMEOUT
    };

    let (tx, rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        // If the receiver already gave up, there is nobody left to tell.
        drop(tx.send(body()));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => {
            worker.join().expect("test thread finished but could not be joined");
            result
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            panic!("test exceeded the {timeout:?} watchdog timeout");
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => match worker.join() {
            Ok(()) => panic!("test thread exited without producing a result"),
            Err(payload) => std::panic::resume_unwind(payload),
        },
    }
}

/// Runs `f` on `thread_count` threads that are released at the same moment and
/// returns their results in thread index order.
///
/// All threads wait on a shared barrier before calling `f`, which maximizes the chance that
/// they race each other through whatever `f` exercises.
///
/// # Panics
///
/// Propagates a panic from any of the threads.
///
/// # Example
///
/// ```rust
/// use testing::run_on_threads;
///
/// let results = run_on_threads(4, |index| index * 10);
/// assert_eq!(results, vec![0, 10, 20, 30]);
/// ```
pub fn run_on_threads<F, R>(thread_count: usize, f: F) -> Vec<R>
where
    F: Fn(usize) -> R + Sync,
    R: Send,
{
    let barrier = Barrier::new(thread_count);

    thread::scope(|scope| {
        let workers: Vec<_> = (0..thread_count)
            .map(|index| {
                let barrier = &barrier;
                let f = &f;

                scope.spawn(move || {
                    barrier.wait();
                    f(index)
                })
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| match worker.join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn watchdog_returns_body_result() {
        assert_eq!(with_watchdog(|| "done"), "done");
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn watchdog_propagates_panic() {
        with_watchdog::<_, ()>(|| panic!("boom"));
    }

    #[test]
    fn run_on_threads_runs_every_index() {
        let counter = AtomicUsize::new(0);

        let results = run_on_threads(5, |index| {
            counter.fetch_add(1, Ordering::Relaxed);
            index
        });

        assert_eq!(results, vec![0, 1, 2, 3, 4]);
        assert_eq!(counter.load(Ordering::Relaxed), 5);
    }
}
