//! Rayon and hardware-concurrency helpers shared by both kernels.
//!
//! The parallel kernels size their worker pools from
//! [`available_workers`], which never reports fewer than one worker so a
//! host that cannot report its parallelism degrades to sequential work
//! instead of spawning nothing.

use std::any::Any;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Number of workers the host can run in parallel, at least 1.
#[inline]
pub fn available_workers() -> usize {
    num_cpus::get().max(1)
}

/// Resolves a configured worker count, where 0 means "auto".
///
/// # Examples
///
/// ```rust
/// use forkjoin_kernel::parallel::{available_workers, resolve_workers};
///
/// assert_eq!(resolve_workers(3), 3);
/// assert_eq!(resolve_workers(0), available_workers());
/// ```
#[inline]
pub fn resolve_workers(requested: usize) -> usize {
    if requested == 0 {
        available_workers()
    } else {
        requested
    }
}

/// Builds a dedicated Rayon pool with `workers` named threads.
///
/// # Errors
///
/// Returns the Rayon build error when the OS refuses to create the
/// threads. Callers treat this as recoverable and run sequentially.
pub fn build_pool(workers: usize, name: &'static str) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(move |index| format!("{name}-{index}"))
        .build()
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_workers_is_positive() {
        assert!(available_workers() >= 1);
    }

    #[test]
    fn test_resolve_workers_explicit() {
        assert_eq!(resolve_workers(1), 1);
        assert_eq!(resolve_workers(16), 16);
    }

    #[test]
    fn test_build_pool_thread_count() {
        let pool = build_pool(2, "test-pool").unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }

    #[test]
    fn test_build_pool_zero_becomes_one() {
        let pool = build_pool(0, "test-pool").unwrap();
        assert_eq!(pool.current_num_threads(), 1);
    }

    #[test]
    fn test_panic_message_variants() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(&*payload), "static message");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(&*payload), "owned message");

        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(&*payload), "unknown panic payload");
    }
}
