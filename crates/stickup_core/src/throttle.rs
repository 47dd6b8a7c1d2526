//! Leading-edge scroll throttle
//!
//! Decides at the event boundary whether a scroll event is handled. A
//! suppressed event is dropped; the next accepted one reads the live scroll
//! offset, so decisions are never made from stale positions. Timestamps are
//! supplied by the host (e.g. `performance.now()`), in milliseconds.

/// Throttle that accepts at most one event per interval
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollThrottle {
    interval_ms: Option<f64>,
    last_accepted: Option<f64>,
}

impl ScrollThrottle {
    /// Throttle with a minimum interval; `None` accepts every event
    pub fn new(interval_ms: Option<f64>) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    /// Whether an event at `now_ms` should be handled
    ///
    /// Accepting an event starts a new interval. A clock that goes
    /// backwards also accepts, restarting the interval from `now_ms`.
    pub fn accept(&mut self, now_ms: f64) -> bool {
        let Some(interval) = self.interval_ms else {
            return true;
        };

        let accepted = match self.last_accepted {
            None => true,
            Some(last) => now_ms < last || now_ms - last >= interval,
        };
        if accepted {
            self.last_accepted = Some(now_ms);
        } else {
            tracing::trace!("scroll event at {}ms throttled", now_ms);
        }
        accepted
    }

    /// Forget the last accepted event so the next one is always handled
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}
