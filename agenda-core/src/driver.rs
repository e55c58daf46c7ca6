//! Scheduling driver: one pass from raw tasks to a finished plan.
//!
//! Pipeline (fixed order):
//! 1. queue fixed tasks by declared priority
//! 2. place fixed tasks, cancelling those before the starting time
//! 3. flag overlapping fixed tasks
//! 4. compute utility scores
//! 5. queue flexible tasks by utility
//! 6. place flexible tasks
//!
//! `run` consumes the scheduler, so a task set is scheduled exactly once.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dependency::{DependencyCheck, check_dependencies};
use crate::error::SchedulerError;
use crate::fixed::{flag_fixed_overlaps, place_fixed_tasks, populate_fixed_queue};
use crate::flexible::{FlexibleCursor, place_flexible_tasks, populate_flexible_queue};
use crate::report::{Notice, NoticeKind, Outcome, ScheduleReport, TaskOutcome, Totals};
use crate::schedule::Schedule;
use crate::task::{Minute, Task, TaskStatus};
use crate::utility::compute_utility_scores;
use crate::validate::{build_task_map, check_time_range};
use crate::TaskMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Nothing is scheduled before this minute.
    pub starting_time: Minute,
    pub cursor: FlexibleCursor,
}

impl SchedulerConfig {
    pub fn starting_at(starting_time: Minute) -> Self {
        Self {
            starting_time,
            ..Self::default()
        }
    }

    pub fn with_cursor(mut self, cursor: FlexibleCursor) -> Self {
        self.cursor = cursor;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TaskScheduler {
    tasks: TaskMap,
    config: SchedulerConfig,
}

impl TaskScheduler {
    /// Validate `tasks` and prepare a run. Structural problems and plans that
    /// would leave the minute range fail here; `run` itself cannot fail.
    pub fn new(tasks: Vec<Task>, config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let tasks = build_task_map(tasks)?;
        check_time_range(&tasks, config.starting_time)?;
        Ok(Self { tasks, config })
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    pub fn run(self) -> ScheduleRun {
        let Self { mut tasks, config } = self;
        let mut schedule = Schedule::new();
        let mut notices = Vec::new();

        if tasks.is_empty() {
            info!("no tasks to schedule");
            notices.push(Notice::info(
                NoticeKind::NothingToSchedule,
                None,
                "No tasks scheduled. Enjoy your day!",
            ));
            return ScheduleRun {
                tasks,
                schedule,
                notices,
                config,
            };
        }

        info!(
            tasks = tasks.len(),
            starting_time = config.starting_time,
            cursor = ?config.cursor,
            "scheduling pass started"
        );

        let fixed = populate_fixed_queue(&mut tasks);
        debug!(queued = fixed.len(), "fixed queue populated");
        place_fixed_tasks(fixed, &mut tasks, &mut schedule, config.starting_time, &mut notices);
        flag_fixed_overlaps(&schedule, &mut notices);

        compute_utility_scores(&mut tasks);

        let flexible = populate_flexible_queue(&mut tasks);
        debug!(queued = flexible.len(), "flexible queue populated");
        place_flexible_tasks(
            flexible,
            &mut tasks,
            &mut schedule,
            config.starting_time,
            config.cursor,
            &mut notices,
        );

        info!(placed = schedule.len(), span = schedule.span(), "scheduling pass finished");

        ScheduleRun {
            tasks,
            schedule,
            notices,
            config,
        }
    }
}

/// A finished pass: terminal tasks, the final schedule, and what happened.
#[derive(Debug, Clone)]
pub struct ScheduleRun {
    tasks: TaskMap,
    schedule: Schedule,
    notices: Vec<Notice>,
    config: SchedulerConfig,
}

impl ScheduleRun {
    pub fn tasks(&self) -> &TaskMap {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Dependency check for one task. Read-only; repeat calls agree.
    pub fn check_dependencies(&self, id: &str) -> Result<DependencyCheck, SchedulerError> {
        let task = self
            .tasks
            .get(id)
            .ok_or_else(|| SchedulerError::UnknownTask(id.to_string()))?;
        Ok(check_dependencies(task, &self.tasks, &self.schedule))
    }

    pub fn totals(&self) -> Totals {
        Totals {
            span_minutes: self.schedule.span(),
            total_utility: self
                .tasks
                .values()
                .filter(|t| t.status == TaskStatus::Completed)
                .map(|t| t.utility_score)
                .sum(),
        }
    }

    pub fn report(&self) -> ScheduleReport {
        let outcome = if self.tasks.is_empty() {
            Outcome::NothingToSchedule
        } else {
            Outcome::Scheduled
        };

        let mut notices = self.notices.clone();
        let mut outcomes = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.values() {
            let check = check_dependencies(task, &self.tasks, &self.schedule);
            if !check.passed() {
                notices.push(Notice::warning(
                    NoticeKind::DependencyViolation,
                    Some(task.id.as_str()),
                    format!(
                        "Dependency issue for Task {} ('{}'): {}",
                        task.id,
                        task.description,
                        check.reason()
                    ),
                ));
            }
            outcomes.push(TaskOutcome {
                id: task.id.clone(),
                description: task.description.clone(),
                status: task.status,
                scheduled_start_time: task.scheduled_start_time,
                scheduled_end_time: task.scheduled_end_time(),
                utility_score: task.utility_score,
                sequence_rank: task.sequence_rank,
                dependency_check: check,
            });
        }

        ScheduleReport {
            outcome,
            starting_time: self.config.starting_time,
            intervals: self.schedule.intervals().to_vec(),
            tasks: outcomes,
            notices,
            totals: self.totals(),
        }
    }
}
