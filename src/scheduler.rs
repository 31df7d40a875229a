// Host-driven scheduling: per-frame loops keyed by handles, and fixed-interval timers.
// The host owns the real clock (requestAnimationFrame / performance.now); these types
// only decide whether a callback is still wanted.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Identity of one run of a per-frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHandle(u32);

impl FrameHandle {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// A cancellable repeating per-frame task. Starting issues a fresh handle so
/// callbacks from an earlier run are recognizably stale.
#[derive(Debug, Default)]
pub struct FrameLoop {
    current: Option<FrameHandle>,
    issued: u32,
}

impl FrameLoop {
    pub fn new() -> Self {
        FrameLoop::default()
    }

    pub fn start(&mut self) -> FrameHandle {
        self.issued = self.issued.wrapping_add(1);
        let handle = FrameHandle(self.issued);
        self.current = Some(handle);
        handle
    }

    /// Returns true if a run was actually cancelled.
    pub fn cancel(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<FrameHandle> {
        self.current
    }

    pub fn is_current(&self, handle: FrameHandle) -> bool {
        self.current == Some(handle)
    }
}

/// Fixed-period timer polled from the host's frame loop.
#[derive(Debug)]
pub struct IntervalTimer {
    period_us: u64,
    next_due: Option<Timestamp>,
}

impl IntervalTimer {
    pub fn new(period_ms: u64) -> Self {
        IntervalTimer {
            period_us: period_ms.saturating_mul(1000).max(1),
            next_due: None,
        }
    }

    /// Arm the timer; first fire is one period after `now`.
    pub fn start(&mut self, now: Timestamp) {
        self.next_due = Some(now.saturating_add_micros(self.period_us));
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Fires at most once per call. Missed periods are skipped, not replayed.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due.saturating_add_micros(self.period_us);
        if next <= now {
            let behind = now.micros_since(due);
            let skipped = behind / self.period_us + 1;
            next = due.saturating_add_micros(skipped.saturating_mul(self.period_us));
        }
        self.next_due = Some(next);
        true
    }
}
