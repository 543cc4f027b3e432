//! Time source abstraction for timestamp stamping.
//!
//! # Responsibility
//! - Give the service layer one injectable source of "now".
//!
//! # Invariants
//! - Implementations return Unix epoch milliseconds.
//! - `SystemClock` never panics, even on a pre-epoch system clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current instant in epoch milliseconds.
///
/// The service stamps `created_at`/`updated_at` through this trait so
/// tests can substitute a deterministic clock.
pub trait Clock {
    /// Returns the current instant as Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|elapsed| i64::try_from(elapsed.as_millis()).ok())
            .unwrap_or(0)
    }
}
