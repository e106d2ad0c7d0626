//! Cancellable delayed actions on a caller-driven clock.
//!
//! UI code never sleeps. A close animation flips a visibility flag right
//! away and schedules the follow-up mutation here; the owner later calls
//! [`Scheduler::take_due`] with the current time and applies whatever has
//! come due.
//!
//! Time is plain milliseconds since the session started, supplied by the
//! caller on every call. That keeps the machines deterministic and lets
//! tests step through an exit animation without waiting for it.

#[derive(Debug)]
struct Pending<A> {
    seq: u64,
    due_at_ms: u64,
    action: A,
}

/// Pending actions of type `A`, ordered by due time.
#[derive(Debug)]
pub struct Scheduler<A> {
    next_seq: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` once `delay_ms` has passed after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            seq,
            due_at_ms: now_ms.saturating_add(delay_ms),
            action,
        });
    }

    /// Drop every pending action.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Remove and return the actions due at `now_ms`, earliest first.
    ///
    /// Actions due at the same instant come out in scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<A> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due_at_ms <= now_ms);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due_at_ms, p.seq));
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut s = Scheduler::new();
        s.schedule(100, 300, "close");
        assert!(s.take_due(399).is_empty());
        assert_eq!(s.take_due(400), vec!["close"]);
        assert!(s.is_idle());
    }

    #[test]
    fn due_actions_come_out_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(0, 500, "late");
        s.schedule(0, 100, "early");
        s.schedule(0, 100, "early-second");
        assert!(s.take_due(99).is_empty());
        assert_eq!(s.take_due(1_000), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn later_actions_stay_pending() {
        let mut s = Scheduler::new();
        s.schedule(0, 300, 1);
        s.schedule(0, 600, 2);
        assert_eq!(s.take_due(300), vec![1]);
        assert!(!s.is_idle());
        assert_eq!(s.take_due(600), vec![2]);
        assert!(s.is_idle());
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut s = Scheduler::new();
        s.schedule(0, 10, ());
        s.schedule(0, 20, ());
        s.cancel_all();
        assert!(s.is_idle());
        assert!(s.take_due(u64::MAX).is_empty());
    }

    #[test]
    fn deadline_saturates() {
        let mut s = Scheduler::new();
        s.schedule(u64::MAX - 1, 10, "x");
        assert!(s.take_due(u64::MAX - 1).is_empty());
        assert_eq!(s.take_due(u64::MAX), vec!["x"]);
    }
}
