// ── Deferred continuations ──
//
// A single-threaded timer queue on a virtual clock. The host advances
// time explicitly; nothing runs in the background. Every scheduled task
// gets a handle that can be cancelled before it fires, which is how
// superseded notifications and card transitions drop their stale work.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Opaque handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Cancellable fixed-delay tasks, fired in deadline order.
///
/// Tasks sharing a deadline fire in the order they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let deadline = self.now.saturating_add(delay);
        self.pending.insert((deadline, seq), task);
        self.deadlines.insert(seq, deadline);
        TimerHandle(seq)
    }

    /// Cancel a pending task. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.pending.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// The clock moves to the task's deadline so follow-up work scheduled
    /// while handling it is timed from when it was due, not from `until`.
    /// Once nothing is due the clock settles at `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let due = self
            .pending
            .first_key_value()
            .is_some_and(|(&(deadline, _), _)| deadline <= until);
        if !due {
            if until > self.now {
                self.now = until;
            }
            return None;
        }
        let ((deadline, seq), task) = self.pending.pop_first()?;
        self.deadlines.remove(&seq);
        if deadline > self.now {
            self.now = deadline;
        }
        Some(task)
    }

    /// Deadline of the next pending task, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.first_key_value().map(|(&(deadline, _), _)| deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(queue: &mut TimerQueue<&'static str>, until: Duration) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(task) = queue.pop_due(until) {
            fired.push(task);
        }
        fired
    }

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(300), "late");
        q.schedule(ms(10), "early");
        q.schedule(ms(10), "early-second");

        assert_eq!(drain(&mut q, ms(5)), Vec::<&str>::new());
        assert_eq!(drain(&mut q, ms(300)), vec!["early", "early-second", "late"]);
        assert!(q.is_empty());
        assert_eq!(q.now(), ms(300));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut q = TimerQueue::new();
        let handle = q.schedule(ms(100), "stale");
        q.schedule(ms(200), "fresh");

        assert!(q.cancel(handle));
        assert!(!q.cancel(handle));
        assert!(!q.is_pending(handle));
        assert_eq!(drain(&mut q, ms(1_000)), vec!["fresh"]);
    }

    #[test]
    fn clock_tracks_popped_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(ms(3_000), "exit");

        assert_eq!(q.pop_due(ms(5_000)), Some("exit"));
        assert_eq!(q.now(), ms(3_000));

        // Scheduled while handling the task: relative to 3000, not 5000.
        q.schedule(ms(300), "remove");
        assert_eq!(q.next_deadline(), Some(ms(3_300)));
        assert_eq!(q.pop_due(ms(5_000)), Some("remove"));
        assert_eq!(q.pop_due(ms(5_000)), None);
        assert_eq!(q.now(), ms(5_000));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        assert_eq!(q.pop_due(ms(50)), None);
        assert_eq!(q.pop_due(ms(20)), None);
        assert_eq!(q.now(), ms(50));
    }
}
