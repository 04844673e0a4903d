//! Apply timer — tracks recently launched applies and reports whether the
//! display tool is presumably still reconfiguring.
//!
//! displayplacer is launched without waiting for it, so there is no real
//! completion signal. An apply counts as in progress for a fixed settle
//! period after launch.

use std::collections::HashMap;

use uuid::Uuid;


/// Per-profile launch timestamps plus a fixed settle period.
pub struct ApplyTimer {
    settle_ms: u64,
    launched: HashMap<Uuid, u64>,
}


impl ApplyTimer {
    /// Create a new timer with the given settle period in milliseconds.
    pub fn new(settle_ms: u64) -> Self {
        ApplyTimer {
            settle_ms,
            launched: HashMap::new(),
        }
    }

    /// Record that `id` was launched at `now_ms`. A repeated apply restarts
    /// that profile's window.
    pub fn record_apply(&mut self, id: Uuid, now_ms: u64) {
        self.launched.insert(id, now_ms);
    }

    /// Profiles still inside their settle window, oldest launch first.
    pub fn in_progress(&self, now_ms: u64) -> Vec<Uuid> {
        let mut pending: Vec<(Uuid, u64)> = self
            .launched
            .iter()
            .filter(|(_, &at)| now_ms.saturating_sub(at) < self.settle_ms)
            .map(|(id, &at)| (*id, at))
            .collect();
        pending.sort_by_key(|(_, at)| *at);
        pending.into_iter().map(|(id, _)| id).collect()
    }

    /// True while any apply is inside its settle window.
    pub fn is_applying(&self, now_ms: u64) -> bool {
        !self.in_progress(now_ms).is_empty()
    }

    /// Milliseconds until every launched apply has settled.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.launched
            .values()
            .map(|&at| (at + self.settle_ms).saturating_sub(now_ms))
            .max()
            .unwrap_or(0)
    }

    /// Forget applies whose window has closed.
    pub fn clear_settled(&mut self, now_ms: u64) {
        let settle = self.settle_ms;
        self.launched
            .retain(|_, at| now_ms.saturating_sub(*at) < settle);
    }

    /// Return the configured settle period.
    pub fn settle_ms(&self) -> u64 {
        self.settle_ms
    }
}


/// Wall-clock milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_is_not_applying() {
        let timer = ApplyTimer::new(1500);
        assert!(!timer.is_applying(10_000));
        assert_eq!(timer.remaining_ms(10_000), 0);
    }

    #[test]
    fn fresh_apply_is_in_progress() {
        let mut timer = ApplyTimer::new(1500);
        let id = Uuid::new_v4();
        timer.record_apply(id, 10_000);
        assert!(timer.is_applying(10_500));
        assert_eq!(timer.in_progress(10_500), vec![id]);
        assert_eq!(timer.remaining_ms(10_500), 1000);
    }

    #[test]
    fn exact_settle_boundary_is_done() {
        let mut timer = ApplyTimer::new(1500);
        timer.record_apply(Uuid::new_v4(), 10_000);
        assert!(!timer.is_applying(11_500));
    }

    #[test]
    fn overlapping_applies_are_both_tracked() {
        let mut timer = ApplyTimer::new(1500);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        timer.record_apply(first, 10_000);
        timer.record_apply(second, 11_000);
        assert_eq!(timer.in_progress(11_200), vec![first, second]);
        // first has settled, second has not
        assert_eq!(timer.in_progress(11_600), vec![second]);
        assert_eq!(timer.remaining_ms(11_600), 900);
    }

    #[test]
    fn reapply_restarts_window() {
        let mut timer = ApplyTimer::new(1500);
        let id = Uuid::new_v4();
        timer.record_apply(id, 10_000);
        timer.record_apply(id, 11_000);
        assert!(timer.is_applying(12_000));
    }

    #[test]
    fn clear_settled_drops_old_entries() {
        let mut timer = ApplyTimer::new(1500);
        let old = Uuid::new_v4();
        let recent = Uuid::new_v4();
        timer.record_apply(old, 1_000);
        timer.record_apply(recent, 10_000);
        timer.clear_settled(10_100);
        assert_eq!(timer.remaining_ms(10_100), 1400);
        assert_eq!(timer.in_progress(10_100), vec![recent]);
    }

    #[test]
    fn settle_accessor() {
        assert_eq!(ApplyTimer::new(3000).settle_ms(), 3000);
    }
}
