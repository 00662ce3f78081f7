//! One-shot deadline timer driven by the frame loop

use std::time::{Duration, Instant};

/// Fires once when polled at or after its deadline
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OneShot {
    due: Option<Instant>,
}

impl OneShot {
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// True exactly once, on the first poll at or past the deadline
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
