//! Deferred-event scheduler, the only concurrency primitive in the core.
//!
//! All bomb and fragment timing is a sorted list of `(deadline, seq, owner,
//! event)` records over one logical millisecond clock, drained once per
//! tick boundary. Nothing here runs concurrently: events fire in deadline
//! order, ties broken by scheduling order. Every record is cancellable by
//! its id or by the owning entity's id; removing an entity must cancel
//! everything it owns so no callback outlives its owner.

use crate::game::types::Direction;

pub type EventId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DetonateBomb {
        bomb_id: String,
    },
    DespawnBomb {
        bomb_id: String,
    },
    DespawnFragment {
        bomb_id: String,
        direction: Direction,
        index: usize,
    },
    StepBomb {
        bomb_id: String,
        sign: i32,
        horizontal: bool,
    },
    KickablePoll {
        bomb_id: String,
        player: usize,
    },
}

#[derive(Debug, Clone)]
struct Scheduled {
    deadline: u64,
    seq: EventId,
    owner: String,
    event: Event,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: Vec<Scheduled>,
    next_seq: EventId,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire `delay` ms after `now`, owned by `owner`.
    pub fn schedule_in(
        &mut self,
        now: u64,
        delay: u64,
        owner: impl Into<String>,
        event: Event,
    ) -> EventId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            deadline: now + delay,
            seq,
            owner: owner.into(),
            event,
        });
        seq
    }

    /// Cancel one pending event. Cancelling an already-fired or unknown id
    /// is a no-op.
    pub fn cancel(&mut self, id: EventId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|s| s.seq != id);
        self.queue.len() != before
    }

    /// Cancel every pending event owned by `owner`; returns how many were
    /// dropped.
    pub fn cancel_owner(&mut self, owner: &str) -> usize {
        let before = self.queue.len();
        self.queue.retain(|s| s.owner != owner);
        before - self.queue.len()
    }

    /// Remove and return every event due at or before `now`, in
    /// `(deadline, seq)` order.
    pub fn take_due(&mut self, now: u64) -> Vec<Event> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.queue.len() {
            if self.queue[i].deadline <= now {
                due.push(self.queue.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|s| (s.deadline, s.seq));
        due.into_iter().map(|s| s.event).collect()
    }

    /// Drop everything pending. Used to stop a round cleanly.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending events owned by `owner`.
    pub fn pending_for(&self, owner: &str) -> usize {
        self.queue.iter().filter(|s| s.owner == owner).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detonate(id: &str) -> Event {
        Event::DetonateBomb { bomb_id: id.into() }
    }

    #[test]
    fn fires_in_deadline_then_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(0, 40, "b", detonate("late"));
        scheduler.schedule_in(0, 20, "a", detonate("first"));
        scheduler.schedule_in(0, 20, "a", detonate("second"));

        assert!(scheduler.take_due(10).is_empty());
        let due = scheduler.take_due(20);
        assert_eq!(due, vec![detonate("first"), detonate("second")]);
        assert_eq!(scheduler.take_due(100), vec![detonate("late")]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn cancel_by_id() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_in(0, 10, "a", detonate("x"));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.take_due(100).is_empty());
    }

    #[test]
    fn cancel_by_owner_drops_all_of_the_owners_events() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(0, 10, "bomb1", detonate("a"));
        scheduler.schedule_in(0, 20, "bomb1", detonate("b"));
        scheduler.schedule_in(0, 30, "bomb2", detonate("c"));
        assert_eq!(scheduler.cancel_owner("bomb1"), 2);
        assert_eq!(scheduler.pending_for("bomb1"), 0);
        assert_eq!(scheduler.take_due(100), vec![detonate("c")]);
    }

    #[test]
    fn clear_flushes_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_in(0, 10, "a", detonate("x"));
        scheduler.schedule_in(0, 20, "b", detonate("y"));
        scheduler.clear();
        assert!(scheduler.is_empty());
    }
}
