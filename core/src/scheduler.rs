//! Timer queue driven by the simulated clock.
//!
//! Timers fire in (due, insertion) order, so two timers due at the same
//! instant fire in the order they were scheduled.

use crate::types::Millis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled<A> {
    pub due:    Millis,
    pub seq:    u64,
    pub action: A,
}

#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    queue:    Vec<Scheduled<A>>,
    next_seq: u64,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self { queue: Vec::new(), next_seq: 0 }
    }

    pub fn schedule(&mut self, due: Millis, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { due, seq, action });
    }

    /// Earliest due time, if anything is pending.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.iter().map(|s| s.due).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Scheduled<A>> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= now)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        Some(self.queue.swap_remove(index))
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_then_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(300, "c");
        s.schedule(100, "a");
        s.schedule(100, "b");
        assert_eq!(s.next_due(), Some(100));
        assert_eq!(s.pop_due(1_000).map(|t| t.action), Some("a"));
        assert_eq!(s.pop_due(1_000).map(|t| t.action), Some("b"));
        assert_eq!(s.pop_due(1_000).map(|t| t.action), Some("c"));
        assert!(s.is_empty());
    }

    #[test]
    fn nothing_fires_early() {
        let mut s = Scheduler::new();
        s.schedule(500, ());
        assert!(s.pop_due(499).is_none());
        assert_eq!(s.len(), 1);
        assert!(s.pop_due(500).is_some());
    }

    #[test]
    fn clear_drops_everything() {
        let mut s = Scheduler::new();
        s.schedule(1, 1);
        s.schedule(2, 2);
        s.clear();
        assert_eq!(s.next_due(), None);
    }
}
