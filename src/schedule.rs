//! Deferred work on a virtual clock.
//!
//! DESIGN
//! ======
//! Every timer the page needs (counter ticks, staggered bars, loader steps,
//! the toggle spin) is an entry here instead of a nested browser callback.
//! The host arms one real timeout for [`Scheduler::next_deadline`] and then
//! drains due entries with [`Scheduler::pop_due`]. Tests advance the clock
//! by hand.
//!
//! Entries with the same due time run in the order they were scheduled.
//! Clearing the scheduler is the teardown path: nothing queued runs after.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

/// Handle for a scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    due_ms: u64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (u64, u64) {
        (self.due_ms, self.seq)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap of `(due time, item)` with a monotonic virtual clock.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry<T>>>,
    cancelled: HashSet<u64>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { now_ms: 0, next_seq: 0, queue: BinaryHeap::new(), cancelled: HashSet::new() }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Queue `item` to run `delay_ms` after the current virtual time.
    pub fn schedule(&mut self, delay_ms: u64, item: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.queue.push(Reverse(Entry { due_ms, seq, item }));
        TaskId(seq)
    }

    /// Drop a queued entry. Returns `false` if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let queued = self.queue.iter().any(|Reverse(e)| e.seq == id.0);
        queued && self.cancelled.insert(id.0)
    }

    /// Drop every queued entry.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Due time of the earliest live entry.
    pub fn next_deadline(&mut self) -> Option<u64> {
        self.skip_cancelled();
        self.queue.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Pop the earliest entry due at or before `now_ms`.
    ///
    /// The clock moves to that entry's due time, so work it schedules is
    /// timed relative to when it was meant to run. When nothing is due the
    /// clock moves to `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<T> {
        self.skip_cancelled();
        let due = self.queue.peek().is_some_and(|Reverse(e)| e.due_ms <= now_ms);
        if !due {
            self.now_ms = self.now_ms.max(now_ms);
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.item)
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn skip_cancelled(&mut self) {
        while let Some(Reverse(head)) = self.queue.peek() {
            if !self.cancelled.remove(&head.seq) {
                break;
            }
            self.queue.pop();
        }
    }
}
