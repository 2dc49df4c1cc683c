//! A virtual clock with a queue of pending timers.

use crate::{SignalId, VehicleId};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Work to be done when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Task {
    /// Spawn a vehicle on a random lane.
    Spawn,
    /// Move a signal to its next phase.
    Signal(SignalId),
    /// Evaluate and move a vehicle.
    Vehicle(VehicleId),
}

/// Pending timers, ordered by deadline and then by the order they were scheduled.
#[derive(Default, Debug)]
pub(crate) struct TimerQueue {
    /// The current time, measured from the start of the simulation.
    now: Duration,
    /// The next sequence number.
    seq: u64,
    /// The pending timers.
    heap: BinaryHeap<Reverse<(Duration, u64, Task)>>,
}

impl TimerQueue {
    /// Gets the current time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules a task to run `after` the current time.
    pub fn schedule(&mut self, after: Duration, task: Task) {
        self.seq += 1;
        self.heap.push(Reverse((self.now + after, self.seq, task)));
    }

    /// Pops the earliest timer due no later than `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let Reverse((due, _, _)) = self.heap.peek()?;
        if *due > until {
            return None;
        }
        let Reverse((due, _, task)) = self.heap.pop()?;
        self.now = due;
        Some(task)
    }

    /// Moves the clock forward to `until` once no more timers are due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
