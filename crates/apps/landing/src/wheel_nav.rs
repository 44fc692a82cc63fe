//! Wheel-driven page navigation over the globe canvas.
//!
//! Wheel deltas accumulate while the user scrolls; once input has been quiet
//! for the configured window the navigator moves one destination forward
//! (positive sum) or back (otherwise) and resets the accumulator.

use foundation::time::Millis;
use runtime::{Scheduler, TimerHandle};

use crate::timers::PageTimer;

/// Ordered navigation targets, shared with the navbar.
pub const DESTINATIONS: [&str; 4] = ["/", "#about", "#projects", "#contact"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Smooth-scroll to an element on this page (`#id`).
    Anchor(&'static str),
    /// Full navigation to another route.
    Route(&'static str),
}

impl Navigation {
    pub fn for_destination(dest: &'static str) -> Self {
        if dest.starts_with('#') {
            Navigation::Anchor(dest)
        } else {
            Navigation::Route(dest)
        }
    }
}

/// Index of the destination matching the current location: exact hash first,
/// then exact path, else the first destination.
pub fn destination_index(path: &str, hash: &str) -> usize {
    let by_hash = (!hash.is_empty())
        .then(|| DESTINATIONS.iter().position(|d| *d == hash))
        .flatten();
    by_hash
        .or_else(|| DESTINATIONS.iter().position(|d| *d == path))
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
pub struct WheelNavigator {
    current: usize,
    accumulated: f64,
    quiet_ms: f64,
    settle_timer: Option<TimerHandle>,
}

impl WheelNavigator {
    pub fn new(quiet_ms: f64, current: usize) -> Self {
        Self {
            current: current.min(DESTINATIONS.len() - 1),
            accumulated: 0.0,
            quiet_ms,
            settle_timer: None,
        }
    }

    pub fn current(&self) -> &'static str {
        DESTINATIONS[self.current]
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Accumulates `delta_y` and restarts the quiet window.
    pub fn on_wheel(&mut self, delta_y: f64, now: Millis, scheduler: &mut Scheduler<PageTimer>) {
        if delta_y.is_finite() {
            self.accumulated += delta_y;
        }
        scheduler.cancel_slot(&mut self.settle_timer);
        self.settle_timer = Some(scheduler.schedule_once(now, self.quiet_ms, PageTimer::WheelSettle));
    }

    /// Called when a `WheelSettle` timer fires. Returns where to go, if anywhere.
    pub fn on_settle(&mut self, handle: TimerHandle) -> Option<Navigation> {
        if self.settle_timer != Some(handle) {
            return None;
        }
        self.settle_timer = None;
        let forward = self.accumulated > 0.0;
        self.accumulated = 0.0;

        let next = if forward {
            (self.current + 1 < DESTINATIONS.len()).then_some(self.current + 1)
        } else {
            self.current.checked_sub(1)
        }?;
        self.current = next;
        tracing::debug!(destination = DESTINATIONS[next], "wheel navigation");
        Some(Navigation::for_destination(DESTINATIONS[next]))
    }

    /// Re-aligns with a destination chosen elsewhere (navbar click).
    pub fn sync_to(&mut self, dest: &str) {
        if let Some(idx) = DESTINATIONS.iter().position(|d| *d == dest) {
            self.current = idx;
        }
    }

    pub fn teardown(&mut self, scheduler: &mut Scheduler<PageTimer>) {
        scheduler.cancel_slot(&mut self.settle_timer);
        self.accumulated = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settle(
        nav: &mut WheelNavigator,
        sched: &mut Scheduler<PageTimer>,
        now: Millis,
    ) -> Vec<Navigation> {
        let mut out = Vec::new();
        while let Some(fired) = sched.pop_due(now) {
            assert_eq!(fired.payload, PageTimer::WheelSettle);
            out.extend(nav.on_settle(fired.handle));
        }
        out
    }

    #[test]
    fn burst_summing_positive_navigates_once() {
        let mut sched = Scheduler::new();
        let mut nav = WheelNavigator::new(150.0, 0);
        for (i, delta) in [100.0, 150.0, 120.0, 130.0].into_iter().enumerate() {
            nav.on_wheel(delta, Millis(i as f64 * 40.0), &mut sched);
        }
        assert_eq!(nav.accumulated(), 500.0);
        // Still inside the quiet window of the last event (t = 120).
        assert!(settle(&mut nav, &mut sched, Millis(260.0)).is_empty());

        let navs = settle(&mut nav, &mut sched, Millis(270.0));
        assert_eq!(navs, vec![Navigation::Anchor("#about")]);
        assert_eq!(nav.accumulated(), 0.0);
        assert!(settle(&mut nav, &mut sched, Millis(10_000.0)).is_empty());
    }

    #[test]
    fn negative_sum_retreats() {
        let mut sched = Scheduler::new();
        let mut nav = WheelNavigator::new(150.0, 2);
        nav.on_wheel(-30.0, Millis(0.0), &mut sched);
        assert_eq!(
            settle(&mut nav, &mut sched, Millis(150.0)),
            vec![Navigation::Anchor("#about")]
        );
        nav.on_wheel(-30.0, Millis(200.0), &mut sched);
        assert_eq!(
            settle(&mut nav, &mut sched, Millis(350.0)),
            vec![Navigation::Route("/")]
        );
    }

    #[test]
    fn out_of_range_moves_are_noops() {
        let mut sched = Scheduler::new();
        let mut nav = WheelNavigator::new(150.0, 0);
        nav.on_wheel(-10.0, Millis(0.0), &mut sched);
        assert!(settle(&mut nav, &mut sched, Millis(200.0)).is_empty());
        assert_eq!(nav.current(), "/");

        nav.sync_to("#contact");
        nav.on_wheel(10.0, Millis(300.0), &mut sched);
        assert!(settle(&mut nav, &mut sched, Millis(500.0)).is_empty());
        assert_eq!(nav.current(), "#contact");
    }

    #[test]
    fn zero_sum_counts_as_retreat() {
        let mut sched = Scheduler::new();
        let mut nav = WheelNavigator::new(150.0, 1);
        nav.on_wheel(50.0, Millis(0.0), &mut sched);
        nav.on_wheel(-50.0, Millis(10.0), &mut sched);
        assert_eq!(
            settle(&mut nav, &mut sched, Millis(200.0)),
            vec![Navigation::Route("/")]
        );
    }

    #[test]
    fn location_resolves_to_destination() {
        assert_eq!(destination_index("/", ""), 0);
        assert_eq!(destination_index("/", "#projects"), 2);
        assert_eq!(destination_index("/", "#how-it-works"), 0);
        assert_eq!(destination_index("/elsewhere", ""), 0);
    }

    #[test]
    fn teardown_cancels_pending_settle() {
        let mut sched = Scheduler::new();
        let mut nav = WheelNavigator::new(150.0, 0);
        nav.on_wheel(100.0, Millis(0.0), &mut sched);
        nav.teardown(&mut sched);
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(nav.accumulated(), 0.0);
    }
}
