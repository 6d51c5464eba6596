//! Limits that let a caller stop a long running search.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

/// Configuration for a [`Solver`](crate::Solver).
///
/// The default configuration places no limits on the search.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    max_steps: Option<u64>,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchConfig {
    /// Create a configuration with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the search once this many rows have been tried.
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Abort the search once the given instant has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort the search once `timeout` has elapsed, measured from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Abort the search once the given flag is set to `true`.
    ///
    /// The flag may be set from any thread, the search notices it before
    /// trying the next row.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Return the budget of rows tried, if any.
    pub fn max_steps(&self) -> Option<u64> {
        self.max_steps
    }

    /// Return the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Return true if the cancellation flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.load(Ordering::Relaxed))
    }
}
