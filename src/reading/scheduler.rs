//! One-shot timer seam between the pacer and whatever drives time.
//!
//! The pacer only needs to arm a single delayed callback and cancel it again.
//! `TimerQueue` provides that over a clock the host moves forward explicitly:
//! the terminal loop feeds it wall-clock time, tests feed it virtual time.

use std::time::Duration;

use log::debug;

/// Handle for an armed timer. Ids are never reused within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub trait Scheduler {
    /// Arms a one-shot timer firing `delay` after the scheduler's current time.
    fn arm(&mut self, delay: Duration) -> TimerId;

    /// Cancels `id`. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Pending one-shot deadlines over a host-driven clock.
///
/// Holds as many timers as it is asked to; keeping that at one is the
/// caller's job.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerId)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading, as last supplied by the host.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|(_, pending)| *pending == id)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Time left until the earliest deadline; zero if it is already due.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    /// Removes and returns the earliest timer due at or before `until`,
    /// moving the clock to its deadline. Ties fire in arming order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (index, &(deadline, id)) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= until)
            .min_by_key(|(_, (deadline, id))| (*deadline, *id))?;
        self.pending.remove(index);
        self.now = self.now.max(deadline);
        Some(id)
    }

    /// Moves the clock forward to `now`. The clock never runs backwards.
    pub fn settle(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for TimerQueue {
    fn arm(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now + delay;
        self.pending.push((deadline, id));
        debug!("Armed timer {:?} for {:?}", id, deadline);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.pending.len();
        self.pending.retain(|(_, pending)| *pending != id);
        if self.pending.len() < before {
            debug!("Cancelled timer {:?}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_arm_is_relative_to_now() {
        let mut queue = TimerQueue::new();
        queue.settle(ms(500));
        queue.arm(ms(1000));
        assert_eq!(queue.next_deadline(), Some(ms(1500)));
        assert_eq!(queue.time_until_next(), Some(ms(1000)));
    }

    #[test]
    fn test_pop_due_respects_deadline() {
        let mut queue = TimerQueue::new();
        let id = queue.arm(ms(1000));
        assert_eq!(queue.pop_due(ms(999)), None);
        assert_eq!(queue.pop_due(ms(1000)), Some(id));
        assert_eq!(queue.now(), ms(1000));
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut queue = TimerQueue::new();
        let late = queue.arm(ms(300));
        let early = queue.arm(ms(100));
        assert_eq!(queue.pop_due(ms(1000)), Some(early));
        assert_eq!(queue.now(), ms(100));
        assert_eq!(queue.pop_due(ms(1000)), Some(late));
        assert_eq!(queue.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_cancel_removes_timer() {
        let mut queue = TimerQueue::new();
        let id = queue.arm(ms(100));
        queue.cancel(id);
        assert!(!queue.is_pending(id));
        assert_eq!(queue.pop_due(ms(1000)), None);
        // cancelling twice is harmless
        queue.cancel(id);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = TimerQueue::new();
        let a = queue.arm(ms(1));
        queue.cancel(a);
        let b = queue.arm(ms(1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut queue = TimerQueue::new();
        queue.settle(ms(800));
        queue.settle(ms(200));
        assert_eq!(queue.now(), ms(800));
    }

    #[test]
    fn test_overdue_timer_reports_zero_wait() {
        let mut queue = TimerQueue::new();
        queue.arm(ms(100));
        queue.settle(ms(250));
        assert_eq!(queue.time_until_next(), Some(Duration::ZERO));
    }
}
