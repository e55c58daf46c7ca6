//! Structural checks run before any placement.
//!
//! Detects:
//! - duplicate task ids
//! - non-positive durations
//! - tasks depending on themselves
//! - dependencies on ids that are not in the task set
//! - tasks handed in with scheduling state already set
//! - fixed tasks whose end does not fit in a `Minute`
//!
//! [`check_time_range`] additionally bounds the whole plan against a
//! starting time, so placement arithmetic cannot overflow.

use std::collections::HashSet;

use crate::error::SchedulerError;
use crate::task::{Minute, Task, TaskStatus};
use crate::TaskMap;

/// Every structural problem in `tasks`, in input order.
pub fn find_problems(tasks: &[Task]) -> Vec<SchedulerError> {
    let mut problems = Vec::new();

    let mut ids = HashSet::new();
    for t in tasks {
        if !ids.insert(t.id.as_str()) {
            problems.push(SchedulerError::DuplicateTaskId(t.id.clone()));
        }
    }

    for t in tasks {
        if t.duration <= 0 {
            problems.push(SchedulerError::NonPositiveDuration {
                task: t.id.clone(),
                duration: t.duration,
            });
        }
        if t.status != TaskStatus::NotStarted
            || t.scheduled_start_time.is_some()
            || t.sequence_rank.is_some()
        {
            problems.push(SchedulerError::AlreadyScheduled(t.id.clone()));
        }
        if let Some(start) = t.start_time {
            if start.checked_add(t.duration).is_none() {
                problems.push(SchedulerError::TimeOutOfRange { task: t.id.clone() });
            }
        }
        for dep in &t.dependencies {
            if *dep == t.id {
                problems.push(SchedulerError::SelfDependency(t.id.clone()));
            } else if !ids.contains(dep.as_str()) {
                problems.push(SchedulerError::MissingDependency {
                    task: t.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
    }

    problems
}

/// Validate and index tasks by id, failing on the first problem.
pub fn build_task_map(tasks: Vec<Task>) -> Result<TaskMap, SchedulerError> {
    if let Some(problem) = find_problems(&tasks).into_iter().next() {
        return Err(problem);
    }
    Ok(tasks.into_iter().map(|t| (t.id.clone(), t)).collect())
}

/// Bound every minute the pass can produce from `starting_time`.
///
/// Placed intervals never end later than the latest fixed end (or the
/// starting time) plus the sum of all flexible durations.
pub fn check_time_range(tasks: &TaskMap, starting_time: Minute) -> Result<(), SchedulerError> {
    let fits = |end: i64| {
        end <= i64::from(Minute::MAX) && end - i64::from(starting_time) <= i64::from(Minute::MAX)
    };

    let mut latest = i64::from(starting_time);
    for task in tasks.values() {
        let Some(start) = task.start_time else { continue };
        if start < starting_time {
            continue;
        }
        let end = i64::from(start) + i64::from(task.duration);
        if !fits(end) {
            return Err(SchedulerError::TimeOutOfRange { task: task.id.clone() });
        }
        latest = latest.max(end);
    }

    for task in tasks.values().filter(|t| t.is_flexible()) {
        latest += i64::from(task.duration);
        if !fits(latest) {
            return Err(SchedulerError::TimeOutOfRange { task: task.id.clone() });
        }
    }
    Ok(())
}
