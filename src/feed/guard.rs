//! Busy flag for single-flight loads.

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds a busy flag set for as long as it lives.
///
/// Dropping the guard clears the flag, so every exit path of a load
/// releases it.
#[derive(Debug)]
pub struct FetchGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FetchGuard<'a> {
    /// Set the flag, or return `None` if it is already set.
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
