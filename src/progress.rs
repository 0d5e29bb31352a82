//! Dual-trigger throttle deciding when a progress update is due.

use std::time::{Duration, Instant};

/// Stateful gate that limits how often progress updates are emitted.
///
/// Two independent triggers, each optional: a time trigger (at most one
/// update per interval) and a percent trigger (at most one update per
/// percentage step). The time trigger is checked first and only the winning
/// trigger's bookkeeping advances, so a call that satisfies both still
/// emits exactly once. The gate never fires when `processed == total`; the
/// terminal state is reported by the finish message instead.
#[derive(Debug)]
pub struct ProgressGate {
    total: usize,
    last_update_at: Instant,
    every_time: Option<Duration>,
    last_update_percent: f64,
    every_percent: Option<f64>,
}

impl ProgressGate {
    pub fn new(
        started: Instant,
        total: usize,
        every_time: Option<Duration>,
        every_percent: Option<f64>,
    ) -> Self {
        Self {
            total,
            last_update_at: started,
            every_time,
            last_update_percent: 0.0,
            every_percent,
        }
    }

    /// Returns `true` if an update should be emitted now, advancing the
    /// internal bookkeeping when it does. `now` is passed in explicitly so
    /// throttling stays deterministic under test.
    pub fn should_emit(&mut self, processed: usize, now: Instant) -> bool {
        if processed == self.total {
            return false;
        }

        if let Some(threshold) = self.every_time {
            if now.duration_since(self.last_update_at) >= threshold {
                self.last_update_at = now;
                return true;
            }
        }

        if let Some(threshold) = self.every_percent {
            let percent = 100.0 * processed as f64 / self.total as f64;
            if percent - self.last_update_percent >= threshold {
                self.last_update_percent = percent;
                return true;
            }
        }

        false
    }
}
