use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opaque identifier returned when a callback is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// Host timer facility (`setInterval` / `setTimeout` on a browser page).
///
/// Implementations never call back into widgets; the owner of the event loop
/// asks which handle fired and forwards it to the widget that scheduled it.
pub trait TimerService {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    fn schedule_once(&mut self, delay: Duration) -> TimerHandle;

    /// Cancels a pending timer. Returns `false` if the handle was unknown or
    /// had already completed.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Time left until `handle` fires next.
    fn remaining(&self, handle: TimerHandle) -> Option<Duration>;
}

/// Repeating timers can't fire more often than this.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    due: Duration,
    repeat: Option<Duration>,
}

/// Deterministic timer driven by an explicit virtual clock.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    /// Pops the earliest timer due at or before `deadline` and moves the clock
    /// to its due time. Repeating timers are re-armed one interval later.
    ///
    /// Callers loop on this so that a handler cancelling or scheduling timers
    /// is observed before the next fire is picked.
    pub fn fire_next(&mut self, deadline: Duration) -> Option<TimerHandle> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= deadline)
            .min_by_key(|(_, entry)| (entry.due, entry.handle.0))
            .map(|(position, _)| position)?;

        let Entry { handle, due, repeat } = self.entries[position].clone();
        self.now = self.now.max(due);
        match repeat {
            Some(interval) => self.entries[position].due = due + interval,
            None => {
                self.entries.remove(position);
            }
        }
        Some(handle)
    }

    /// Moves the clock forward to `deadline` once every due timer has fired.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn push(&mut self, delay: Duration, repeat: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            due: self.now + delay,
            repeat,
        });
        handle
    }
}

impl TimerService for ManualTimer {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        self.push(interval, Some(interval))
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerHandle {
        self.push(delay, None)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.entries
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| entry.due.saturating_sub(self.now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn drain(timer: &mut ManualTimer, deadline: Duration) -> Vec<(TimerHandle, Duration)> {
        let mut fired = Vec::new();
        while let Some(handle) = timer.fire_next(deadline) {
            fired.push((handle, timer.now()));
        }
        timer.settle(deadline);
        fired
    }

    #[test]
    fn repeating_timer_fires_every_interval() {
        let mut timer = ManualTimer::new();
        let handle = timer.schedule_repeating(ms(100));

        let fired = drain(&mut timer, ms(350));
        assert_eq!(fired, vec![(handle, ms(100)), (handle, ms(200)), (handle, ms(300))]);
        assert_eq!(timer.remaining(handle), Some(ms(50)));
    }

    #[test]
    fn one_shot_timer_is_removed_after_firing() {
        let mut timer = ManualTimer::new();
        let handle = timer.schedule_once(ms(30));

        assert_eq!(drain(&mut timer, ms(100)).len(), 1);
        assert!(!timer.is_scheduled(handle));
        assert!(!timer.cancel(handle));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = ManualTimer::new();
        let handle = timer.schedule_repeating(ms(10));
        assert!(timer.cancel(handle));
        assert!(drain(&mut timer, ms(1_000)).is_empty());
        assert_eq!(timer.now(), ms(1_000));
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut timer = ManualTimer::new();
        let first = timer.schedule_once(ms(50));
        let second = timer.schedule_repeating(ms(50));

        let fired: Vec<_> = drain(&mut timer, ms(50)).into_iter().map(|(h, _)| h).collect();
        assert_eq!(fired, vec![first, second]);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut timer = ManualTimer::new();
        timer.schedule_repeating(Duration::ZERO);
        assert_eq!(drain(&mut timer, ms(3)).len(), 3);
    }
}
