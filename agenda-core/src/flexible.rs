//! Flexible-time placement: greedy first fit around what is already booked.
//!
//! Each task starts from a candidate minute and makes one pass over the
//! schedule in start order. Whenever the candidate window collides with an
//! interval, the candidate jumps to that interval's end. Intervals already
//! passed are not revisited after a jump, which is sound as long as the
//! intervals already in the schedule do not overlap each other.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::queue::PriorityQueue;
use crate::report::{Notice, NoticeKind};
use crate::schedule::{Interval, Schedule};
use crate::task::{Minute, TaskId, TaskStatus};
use crate::time::format_clock;
use crate::TaskMap;

/// Where each flexible task's search begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexibleCursor {
    /// Every task searches from the allowed starting time.
    #[default]
    Reset,
    /// Each task searches from where the previous flexible task ended.
    Carry,
}

/// Queue every not-started flexible task, keyed by utility.
pub fn populate_flexible_queue(tasks: &mut TaskMap) -> PriorityQueue<i64, TaskId> {
    let mut queue = PriorityQueue::new();
    for task in tasks.values_mut() {
        if task.status == TaskStatus::NotStarted && task.is_flexible() {
            task.status = TaskStatus::InPriorityQueue;
            queue.push(task.id.clone(), task.utility_score);
        }
    }
    queue
}

/// First start at or after `from` that clears every interval in one pass.
pub fn find_slot(schedule: &Schedule, from: Minute, duration: Minute) -> Minute {
    let mut candidate = from;
    for slot in schedule.iter() {
        if slot.collides(candidate, duration) {
            candidate = slot.end;
        }
    }
    candidate
}

pub fn place_flexible_tasks(
    mut queue: PriorityQueue<i64, TaskId>,
    tasks: &mut TaskMap,
    schedule: &mut Schedule,
    starting_time: Minute,
    cursor: FlexibleCursor,
    notices: &mut Vec<Notice>,
) {
    let mut from = starting_time;

    while let Some(id) = queue.pop() {
        let Some(task) = tasks.get_mut(&id) else { continue };

        if cursor == FlexibleCursor::Reset {
            from = starting_time;
        }
        let start = find_slot(schedule, from, task.duration);
        let end = start + task.duration;
        debug!(task_id = %task.id, from, start, "slot found");

        task.scheduled_start_time = Some(start);
        task.status = TaskStatus::Completed;
        schedule.insert(Interval::new(start, end, task.id.clone()));
        from = end;

        info!(task_id = %task.id, start, end, utility = task.utility_score, "flexible task placed");
        notices.push(Notice::info(
            NoticeKind::FlexiblePlaced,
            Some(task.id.as_str()),
            format!(
                "Adding Flexible Schedule... '{}' at {} for {} mins.",
                task.description,
                format_clock(start),
                task.duration
            ),
        ));
    }
}
