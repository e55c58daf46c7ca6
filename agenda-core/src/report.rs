//! Structured scheduling output.
//!
//! The core never prints. Everything a front end needs to render a plan
//! lives in these types: notices collected while placing, the final
//! interval list, per-task outcomes and aggregate totals.

use serde::{Deserialize, Serialize};

use crate::dependency::DependencyCheck;
use crate::schedule::Interval;
use crate::task::{Minute, TaskId, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    NothingToSchedule,
    FixedPlaced,
    FlexiblePlaced,
    TooEarly,
    FixedOverlap,
    DependencyViolation,
}

/// One event of a scheduling pass, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub kind: NoticeKind,
    pub task_id: Option<TaskId>,
    pub message: String,
}

impl Notice {
    pub fn info(kind: NoticeKind, task_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            kind,
            task_id: task_id.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn warning(kind: NoticeKind, task_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            kind,
            task_id: task_id.map(str::to_string),
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level == NoticeLevel::Warning
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NothingToSchedule,
    Scheduled,
}

/// Terminal state of one task after the pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub id: TaskId,
    pub description: String,
    pub status: TaskStatus,
    pub scheduled_start_time: Option<Minute>,
    pub scheduled_end_time: Option<Minute>,
    pub utility_score: i64,
    pub sequence_rank: Option<i32>,
    pub dependency_check: DependencyCheck,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Latest interval end minus earliest interval start. A fixed interval
    /// nested inside an earlier one does not shorten it.
    pub span_minutes: Minute,
    /// Sum of utility over completed tasks.
    pub total_utility: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub outcome: Outcome,
    pub starting_time: Minute,
    pub intervals: Vec<Interval>,
    pub tasks: Vec<TaskOutcome>,
    pub notices: Vec<Notice>,
    pub totals: Totals,
}

impl ScheduleReport {
    pub fn is_empty(&self) -> bool {
        self.outcome == Outcome::NothingToSchedule
    }

    pub fn task(&self, id: &str) -> Option<&TaskOutcome> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn all_dependencies_cleared(&self) -> bool {
        self.tasks.iter().all(|t| t.dependency_check.passed())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.is_warning())
    }
}
