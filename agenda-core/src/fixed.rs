//! Fixed-time placement.
//!
//! Fixed tasks land exactly on their declared start. Tasks declared before
//! the allowed starting time are cancelled (TooEarly). Collisions between
//! fixed tasks are accepted here and only flagged afterwards by
//! [`flag_fixed_overlaps`].

use tracing::{info, warn};

use crate::queue::PriorityQueue;
use crate::report::{Notice, NoticeKind};
use crate::schedule::{Interval, Schedule};
use crate::task::{Minute, TaskId, TaskStatus};
use crate::time::format_clock;
use crate::TaskMap;

/// Queue every not-started fixed task, keyed by declared priority.
pub fn populate_fixed_queue(tasks: &mut TaskMap) -> PriorityQueue<i32, TaskId> {
    let mut queue = PriorityQueue::new();
    for task in tasks.values_mut() {
        if task.status == TaskStatus::NotStarted && task.is_fixed() {
            task.status = TaskStatus::InPriorityQueue;
            queue.push(task.id.clone(), task.declared_priority);
        }
    }
    queue
}

/// Drain the fixed queue into the schedule.
///
/// Placed tasks get a `sequence_rank` counting down from the queue size, so
/// the first task popped holds the highest rank.
pub fn place_fixed_tasks(
    mut queue: PriorityQueue<i32, TaskId>,
    tasks: &mut TaskMap,
    schedule: &mut Schedule,
    starting_time: Minute,
    notices: &mut Vec<Notice>,
) {
    let mut rank = queue.len() as i32;

    while let Some(id) = queue.pop() {
        let Some(task) = tasks.get_mut(&id) else { continue };
        let Some(start) = task.start_time else { continue };

        if start < starting_time {
            task.status = TaskStatus::TooEarly;
            warn!(task_id = %task.id, start, starting_time, "fixed task before starting time, cancelled");
            notices.push(Notice::warning(
                NoticeKind::TooEarly,
                Some(task.id.as_str()),
                format!(
                    "Task '{}' scheduled too early (before starting time), so it is canceled",
                    task.description
                ),
            ));
            continue;
        }

        task.sequence_rank = Some(rank);
        rank -= 1;

        task.scheduled_start_time = Some(start);
        task.status = TaskStatus::Completed;
        let end = start + task.duration;
        schedule.insert(Interval::new(start, end, task.id.clone()));

        info!(task_id = %task.id, start, end, rank = ?task.sequence_rank, "fixed task placed");
        notices.push(Notice::info(
            NoticeKind::FixedPlaced,
            Some(task.id.as_str()),
            format!(
                "Adding Fixed Schedule... '{}' at {} for {} mins.",
                task.description,
                format_clock(start),
                task.duration
            ),
        ));
    }
}

/// Warn about every pair of fixed tasks sharing time. Nothing is moved.
pub fn flag_fixed_overlaps(schedule: &Schedule, notices: &mut Vec<Notice>) {
    for (a, b) in schedule.overlapping_pairs() {
        warn!(first = %a.task_id, second = %b.task_id, "fixed tasks overlap");
        notices.push(Notice::warning(
            NoticeKind::FixedOverlap,
            Some(b.task_id.as_str()),
            format!(
                "Fixed tasks {} ({}-{}) and {} ({}-{}) overlap; both were kept",
                a.task_id,
                format_clock(a.start),
                format_clock(a.end),
                b.task_id,
                format_clock(b.start),
                format_clock(b.end)
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn map(tasks: Vec<Task>) -> TaskMap {
        tasks.into_iter().map(|t| (t.id.clone(), t)).collect()
    }

    fn run(tasks: &mut TaskMap, starting_time: Minute) -> (Schedule, Vec<Notice>) {
        let mut schedule = Schedule::new();
        let mut notices = Vec::new();
        let queue = populate_fixed_queue(tasks);
        place_fixed_tasks(queue, tasks, &mut schedule, starting_time, &mut notices);
        (schedule, notices)
    }

    #[test]
    fn ranks_count_down_in_priority_order() {
        let mut tasks = map(vec![
            Task::new("a", "gym").with_start_time(420).with_priority(1),
            Task::new("b", "lecture").with_start_time(600).with_priority(9),
            Task::new("c", "lab").with_start_time(780).with_priority(5),
            Task::new("flex", "reading"),
        ]);
        let (schedule, notices) = run(&mut tasks, 0);

        assert_eq!(tasks["b"].sequence_rank, Some(3));
        assert_eq!(tasks["c"].sequence_rank, Some(2));
        assert_eq!(tasks["a"].sequence_rank, Some(1));
        assert_eq!(tasks["flex"].status, TaskStatus::NotStarted);

        let starts: Vec<_> = schedule.iter().map(|i| i.start).collect();
        assert_eq!(starts, vec![420, 600, 780]);
        assert_eq!(notices.len(), 3);
    }

    #[test]
    fn too_early_is_cancelled_without_interval() {
        let mut tasks = map(vec![
            Task::new("early", "breakfast").with_start_time(400).with_priority(9),
            Task::new("ok", "class").with_start_time(540).with_priority(1),
        ]);
        let (schedule, notices) = run(&mut tasks, 480);

        assert_eq!(tasks["early"].status, TaskStatus::TooEarly);
        assert_eq!(tasks["early"].scheduled_start_time, None);
        assert_eq!(tasks["early"].sequence_rank, None);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.intervals()[0].task_id, "ok");
        // rejected task did not consume a rank
        assert_eq!(tasks["ok"].sequence_rank, Some(2));
        assert!(notices
            .iter()
            .any(|n| n.kind == NoticeKind::TooEarly && n.task_id.as_deref() == Some("early")));
    }

    #[test]
    fn identical_starts_are_both_placed_and_flagged() {
        let mut tasks = map(vec![
            Task::new("x", "call").with_start_time(600).with_duration(30),
            Task::new("y", "meeting").with_start_time(600).with_duration(30),
        ]);
        let (schedule, mut notices) = run(&mut tasks, 0);

        assert_eq!(schedule.len(), 2);
        assert!(schedule.iter().all(|i| i.start == 600 && i.end == 630));

        flag_fixed_overlaps(&schedule, &mut notices);
        assert_eq!(
            notices.iter().filter(|n| n.kind == NoticeKind::FixedOverlap).count(),
            1
        );
    }
}
