//! Task model for the agenda scheduler.
//!
//! A task is either fixed (it declares a `start_time`) or flexible (the
//! scheduler picks its start). Times are plain minutes from a reference zero,
//! usually minute-of-day.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type TaskId = String;

/// Minutes from the scheduling reference zero.
pub type Minute = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InPriorityQueue,
    Completed,
    /// Fixed task whose declared start precedes the allowed starting time.
    TooEarly,
}

/// Core task type.
///
/// Caller-owned fields are set through the builder methods. The scheduling
/// fields (`status`, `sequence_rank`, `utility_score`, `scheduled_start_time`)
/// are written only by the scheduler during a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,

    pub dependencies: BTreeSet<TaskId>,

    /// Present for fixed tasks.
    pub start_time: Option<Minute>,

    /// Minutes, must be positive.
    pub duration: Minute,

    pub academic_career_importance: u32,
    pub personal_interest: u32,

    /// Caller-assigned heap key for fixed tasks.
    pub declared_priority: i32,

    /// Placement order marker assigned by the fixed-time placer.
    pub sequence_rank: Option<i32>,

    pub utility_score: i64,
    pub status: TaskStatus,
    pub scheduled_start_time: Option<Minute>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            dependencies: BTreeSet::new(),
            start_time: None,
            duration: 30,
            academic_career_importance: 0,
            personal_interest: 0,
            declared_priority: 0,
            sequence_rank: None,
            utility_score: 0,
            status: TaskStatus::NotStarted,
            scheduled_start_time: None,
        }
    }

    pub fn with_duration(mut self, minutes: Minute) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_start_time(mut self, minute: Minute) -> Self {
        self.start_time = Some(minute);
        self
    }

    pub fn with_dependency(mut self, id: impl Into<TaskId>) -> Self {
        self.dependencies.insert(id.into());
        self
    }

    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_importance(mut self, academic_career: u32, personal_interest: u32) -> Self {
        self.academic_career_importance = academic_career;
        self.personal_interest = personal_interest;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.declared_priority = priority;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_flexible(&self) -> bool {
        self.start_time.is_none()
    }

    /// Priority this task passes on to its dependencies when it is fixed.
    ///
    /// A placed fixed task was renumbered by the placer; a rejected one keeps
    /// what the caller declared.
    pub fn inherited_priority(&self) -> i32 {
        self.sequence_rank.unwrap_or(self.declared_priority)
    }

    pub fn scheduled_end_time(&self) -> Option<Minute> {
        self.scheduled_start_time.map(|s| s + self.duration)
    }
}
