//! The comprehensive schedule: every placed interval, sorted by start.

use serde::{Deserialize, Serialize};

use crate::task::{Minute, TaskId};

/// Half-open `[start, end)` slot occupied by one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: Minute,
    pub end: Minute,
    pub task_id: TaskId,
}

impl Interval {
    pub fn new(start: Minute, end: Minute, task_id: impl Into<TaskId>) -> Self {
        Self {
            start,
            end,
            task_id: task_id.into(),
        }
    }

    /// True when a window of `duration` starting at `at` would collide with this slot.
    pub fn collides(&self, at: Minute, duration: Minute) -> bool {
        at < self.end && at + duration > self.start
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.collides(other.start, other.end - other.start)
    }
}

/// Ordered interval list shared by the placement phases.
///
/// Inserts keep the list sorted by start; intervals with equal starts stay
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    intervals: Vec<Interval>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, interval: Interval) {
        let at = self
            .intervals
            .partition_point(|i| i.start <= interval.start);
        self.intervals.insert(at, interval);
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// End of the first interval recorded for `task_id`.
    pub fn end_of(&self, task_id: &str) -> Option<Minute> {
        self.intervals
            .iter()
            .find(|i| i.task_id == task_id)
            .map(|i| i.end)
    }

    /// Latest end minus earliest start; 0 for an empty schedule.
    pub fn span(&self) -> Minute {
        let Some(first) = self.intervals.first() else {
            return 0;
        };
        let last_end = self
            .intervals
            .iter()
            .map(|i| i.end)
            .max()
            .unwrap_or(first.end);
        last_end - first.start
    }

    /// Every pair of intervals that overlap, in schedule order.
    pub fn overlapping_pairs(&self) -> Vec<(&Interval, &Interval)> {
        let mut out = Vec::new();
        for (i, a) in self.intervals.iter().enumerate() {
            // sorted by start: once b starts at or after a ends, nothing later overlaps a
            for b in self.intervals[i + 1..].iter().take_while(|b| b.start < a.end) {
                if a.overlaps(b) {
                    out.push((a, b));
                }
            }
        }
        out
    }
}
