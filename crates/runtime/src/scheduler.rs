use foundation::time::Millis;

/// Smallest interval accepted for repeating timers.
const MIN_INTERVAL_MS: f64 = 1.0;

/// Identifies one scheduled timer. Handles are never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    pub due: Millis,
    pub payload: T,
}

#[derive(Debug)]
struct Timer<T> {
    handle: TimerHandle,
    due: Millis,
    interval_ms: Option<f64>,
    payload: T,
}

/// Host-agnostic timer queue.
///
/// Replaces `setTimeout`/`setInterval` chains: the host feeds the current
/// time in (once per animation frame in the browser) and drains due timers
/// with [`Scheduler::pop_due`]. Firing order is total: `(due, handle)`, so
/// equal deadlines fire in scheduling order. A timer cancelled while others
/// are being drained never fires.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_handle: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            timers: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, due: Millis, interval_ms: Option<f64>, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.timers.push(Timer {
            handle,
            due,
            interval_ms,
            payload,
        });
        handle
    }

    /// Fires once, `delay_ms` after `now`.
    pub fn schedule_once(&mut self, now: Millis, delay_ms: f64, payload: T) -> TimerHandle {
        self.insert(now.after(delay_ms.max(0.0)), None, payload)
    }

    /// Fires every `interval_ms`, first at `now + interval_ms`.
    pub fn schedule_every(&mut self, now: Millis, interval_ms: f64, payload: T) -> TimerHandle {
        let interval = interval_ms.max(MIN_INTERVAL_MS);
        self.insert(now.after(interval), Some(interval), payload)
    }

    /// Returns `true` if the timer was still pending.
    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancels the timer held in `slot` (if any) and empties the slot.
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerHandle>) -> bool {
        match slot.take() {
            Some(handle) => self.cancel(handle),
            None => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Pops the earliest timer due at or before `now`.
    ///
    /// Repeating timers are re-armed; a repeating timer that fell more than
    /// one interval behind skips the missed ticks instead of bursting.
    pub fn pop_due(&mut self, now: Millis) -> Option<Fired<T>> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due.0 <= now.0)
            .min_by(|(_, a), (_, b)| a.due.0.total_cmp(&b.due.0).then_with(|| a.handle.cmp(&b.handle)))
            .map(|(i, _)| i)?;

        match self.timers[idx].interval_ms {
            None => {
                let t = self.timers.swap_remove(idx);
                Some(Fired {
                    handle: t.handle,
                    due: t.due,
                    payload: t.payload,
                })
            }
            Some(interval) => {
                let t = &mut self.timers[idx];
                let fired = Fired {
                    handle: t.handle,
                    due: t.due,
                    payload: t.payload.clone(),
                };
                let mut next = t.due.after(interval);
                if next.0 <= now.0 {
                    next = now.after(interval);
                }
                t.due = next;
                Some(fired)
            }
        }
    }
}
